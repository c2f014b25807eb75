//! Prometheus metrics HTTP server.
//!
//! Every GET on the metrics path runs one scrape against Pingdom and
//! encodes the result together with the build info gauge.

use crate::metrics::{PingdomExporter, register_build_info};
use bytes::Bytes;
use http_body_util::Full;
use hyper::header::{CONTENT_TYPE, HeaderValue};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use prometheus_client::encoding::text::encode;
use prometheus_client::registry::Registry;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tracing::{debug, error, info};

/// Content type of the exposition produced by `prometheus_client`.
pub const OPENMETRICS_CONTENT_TYPE: &str =
    "application/openmetrics-text; version=1.0.0; charset=utf-8";

/// Prometheus metrics HTTP server.
pub struct MetricsServer {
    /// Bound listener.
    listener: TcpListener,
    /// Path for metrics endpoint.
    path: String,
    /// Scrape-time collector.
    exporter: PingdomExporter,
}

impl MetricsServer {
    /// Bind the listen socket.
    ///
    /// Binding happens up front so that a busy or invalid address fails
    /// startup instead of a background task.
    pub async fn bind(
        address: SocketAddr,
        path: String,
        exporter: PingdomExporter,
    ) -> std::io::Result<Self> {
        let listener = TcpListener::bind(address).await?;
        Ok(Self {
            listener,
            path,
            exporter,
        })
    }

    /// Address the server is actually listening on.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Serve requests until shutdown is signalled.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        if let Ok(address) = self.listener.local_addr() {
            info!(address = %address, path = %self.path, "metrics server started");
        }

        let exporter = Arc::new(self.exporter);
        let path = Arc::new(self.path);

        loop {
            tokio::select! {
                accept_result = self.listener.accept() => {
                    match accept_result {
                        Ok((stream, _addr)) => {
                            let exporter = Arc::clone(&exporter);
                            let path = Arc::clone(&path);

                            tokio::spawn(async move {
                                let io = TokioIo::new(stream);
                                let service = service_fn(move |req| {
                                    let exporter = Arc::clone(&exporter);
                                    let path = Arc::clone(&path);
                                    async move {
                                        handle_request(req, &exporter, &path).await
                                    }
                                });

                                if let Err(e) = http1::Builder::new()
                                    .serve_connection(io, service)
                                    .await
                                {
                                    debug!(error = %e, "metrics connection error");
                                }
                            });
                        }
                        Err(e) => {
                            error!(error = %e, "failed to accept metrics connection");
                        }
                    }
                }

                _ = shutdown.recv() => {
                    info!("metrics server shutting down");
                    break;
                }
            }
        }
    }
}

/// Handle an incoming request.
async fn handle_request<B>(
    req: Request<B>,
    exporter: &PingdomExporter,
    metrics_path: &str,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let path = req.uri().path();
    let method = req.method();

    debug!(path = %path, method = %method, "metrics request");

    if method != Method::GET {
        return Ok(response(
            StatusCode::METHOD_NOT_ALLOWED,
            "text/plain",
            "Method not allowed\n",
        ));
    }

    if path == metrics_path {
        match scrape(exporter).await {
            Ok(buffer) => Ok(response(StatusCode::OK, OPENMETRICS_CONTENT_TYPE, buffer)),
            Err(e) => {
                error!(error = %e, "failed to encode metrics");
                Ok(response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "text/plain",
                    "Failed to encode metrics\n",
                ))
            }
        }
    } else if path == "/" {
        Ok(response(
            StatusCode::OK,
            "text/html; charset=utf-8",
            landing_page(metrics_path),
        ))
    } else {
        Ok(response(StatusCode::NOT_FOUND, "text/plain", "Not found\n"))
    }
}

/// Run one scrape and encode it in a registry of its own.
async fn scrape(exporter: &PingdomExporter) -> Result<String, std::fmt::Error> {
    let scrape = exporter.collect().await;

    let mut registry = Registry::default();
    register_build_info(&mut registry);
    registry.register_collector(Box::new(scrape));

    let mut buffer = String::new();
    encode(&mut buffer, &registry)?;
    Ok(buffer)
}

fn landing_page(metrics_path: &str) -> String {
    format!(
        "<html>\n\
         <head><title>Pingdom Exporter</title></head>\n\
         <body>\n\
         <h1>Pingdom Exporter</h1>\n\
         <p><a href='{metrics_path}'>Metrics</a></p>\n\
         </body>\n\
         </html>\n"
    )
}

fn response(
    status: StatusCode,
    content_type: &'static str,
    body: impl Into<Bytes>,
) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(body.into()));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pingdom::{Check, ChecksApi, PingdomError};
    use async_trait::async_trait;
    use http_body_util::BodyExt;

    struct StaticChecks(Vec<Check>);

    #[async_trait]
    impl ChecksApi for StaticChecks {
        async fn list_checks(&self) -> Result<Vec<Check>, PingdomError> {
            Ok(self.0.clone())
        }
    }

    fn exporter() -> PingdomExporter {
        PingdomExporter::new(Arc::new(StaticChecks(vec![Check {
            id: 42,
            name: "homepage".to_string(),
            hostname: "example.com".to_string(),
            status: "down".to_string(),
            last_response_time: 812,
            resolution: 1,
        }])))
    }

    fn get(uri: &str) -> Request<()> {
        Request::builder().method(Method::GET).uri(uri).body(()).unwrap()
    }

    async fn body_string(response: Response<Full<Bytes>>) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_metrics_endpoint() {
        let response = handle_request(get("/metrics"), &exporter(), "/metrics")
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[CONTENT_TYPE],
            HeaderValue::from_static(OPENMETRICS_CONTENT_TYPE)
        );

        let body = body_string(response).await;
        assert!(body.contains("pingdom_up 1"));
        assert!(body.contains(
            r#"pingdom_check_status{id="42",name="homepage",hostname="example.com",status="down"} 1"#
        ));
        assert!(body.contains("pingdom_check_response_time"));
        assert!(body.contains("pingdom_exporter_build_info"));
    }

    #[tokio::test]
    async fn test_custom_metrics_path() {
        let response = handle_request(get("/probe"), &exporter(), "/probe")
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = handle_request(get("/metrics"), &exporter(), "/probe")
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_landing_page_links_metrics_path() {
        let response = handle_request(get("/"), &exporter(), "/probe").await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_string(response).await;
        assert!(body.contains("<title>Pingdom Exporter</title>"));
        assert!(body.contains("<a href='/probe'>Metrics</a>"));
    }

    #[tokio::test]
    async fn test_non_get_rejected() {
        let req = Request::builder()
            .method(Method::POST)
            .uri("/metrics")
            .body(())
            .unwrap();
        let response = handle_request(req, &exporter(), "/metrics").await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_bind_reports_local_addr() {
        let server = MetricsServer::bind(
            "127.0.0.1:0".parse().unwrap(),
            "/metrics".to_string(),
            exporter(),
        )
        .await
        .unwrap();
        assert_ne!(server.local_addr().unwrap().port(), 0);
    }
}
