//! HTTP server implementation.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use log::{debug, error, info, warn};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::signal;
use tokio::sync::{RwLock, Semaphore};
use tokio::task::JoinSet;

use crate::parser::{parse_request, HttpRequest, Method};
use crate::server::config::ServerConfig;
use crate::server::cors::CorsPolicy;
use crate::server::error::Error;
use crate::server::handler::{HandlerFn, HandlerFuture, PathPattern, Route};
use crate::server::response::{HttpResponse, StatusCode};

const SHUTDOWN_GRACE: tokio::time::Duration = tokio::time::Duration::from_secs(30);

/// An HTTP server.
pub struct HttpServer {
    /// The server configuration.
    pub config: ServerConfig,
    /// The routes, in registration order.
    pub routes: Arc<RwLock<Vec<Route>>>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            routes: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Register a handler for `pattern`. Segments written `{name}` are path variables.
    pub async fn add_route<F, Fut>(&self, pattern: &str, methods: Vec<Method>, handler: F)
    where
        F: Fn(HttpRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<HttpResponse, Error>> + Send + 'static,
    {
        let handler: HandlerFn = Arc::new(move |req: HttpRequest| -> HandlerFuture { Box::pin(handler(req)) });

        self.routes.write().await.push(Route {
            pattern: PathPattern::parse(pattern),
            methods,
            handler,
        });
    }

    /// `METHODS pattern` lines for every registered route.
    pub async fn endpoints(&self) -> Vec<String> {
        self.routes
            .read()
            .await
            .iter()
            .map(|route| {
                let methods = route.methods.iter().map(Method::as_str).collect::<Vec<_>>().join(", ");
                format!("{methods} {}", route.pattern.as_str())
            })
            .collect()
    }

    /// Bind the configured address and serve until Ctrl+C.
    pub async fn start(&self) -> Result<(), Error> {
        let addr = self.config.addr;
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| Error::Bind { addr, source })?;

        self.serve(listener, Self::ctrl_c()).await
    }

    /// Accept connections on `listener` until `shutdown` resolves, then wait
    /// for in-flight connections to finish.
    pub async fn serve(&self, listener: TcpListener, shutdown: impl Future<Output = ()>) -> Result<(), Error> {
        let local_addr = listener.local_addr()?;
        info!("Backend server running on http://{local_addr}");
        info!("Registered endpoints:");
        for endpoint in self.endpoints().await {
            info!("  {endpoint}");
        }

        let semaphore = Arc::new(Semaphore::new(self.config.max_connections));
        let cors = Arc::new(self.config.cors.clone());
        let mut tasks = JoinSet::new();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Shutting down server...");
                    break;
                }

                Some(finished) = tasks.join_next(), if !tasks.is_empty() => {
                    if let Err(e) = finished {
                        error!("Connection task failed: {e}");
                    }
                }

                accepted = listener.accept() => {
                    match accepted {
                        Ok((socket, addr)) => {
                            self.handle_new_connection(socket, addr, &semaphore, &cors, &mut tasks).await;
                        }
                        Err(e) => {
                            // Usually transient (e.g. file descriptor exhaustion); back off briefly.
                            error!("Error accepting connection: {e}");
                            tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
                        }
                    }
                }
            }
        }

        Self::perform_shutdown(&mut tasks).await;
        Ok(())
    }

    async fn ctrl_c() {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, initiating graceful shutdown"),
            Err(e) => {
                error!("Error setting up Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    }

    async fn handle_new_connection(
        &self,
        mut socket: TcpStream,
        addr: SocketAddr,
        semaphore: &Arc<Semaphore>,
        cors: &Arc<CorsPolicy>,
        tasks: &mut JoinSet<()>,
    ) {
        let Ok(permit) = semaphore.clone().try_acquire_owned() else {
            warn!("Connection limit reached, rejecting connection from {addr}");
            let response = HttpResponse::text(
                StatusCode::ServiceUnavailable,
                "Server is at capacity, please try again later",
            );
            let _ = socket.write_all(&response.to_bytes()).await;
            return;
        };

        let routes = self.routes.clone();
        let cors = cors.clone();
        let read_buffer_size = self.config.read_buffer_size;

        tasks.spawn(async move {
            let _permit = permit;

            match Self::handle_connection(&mut socket, routes, &cors, read_buffer_size).await {
                Ok(()) => {}
                Err(Error::IoError(e)) => debug!("Connection with {addr} dropped: {e}"),
                Err(e) if e.is_client_error() => debug!("{addr}: {e}"),
                Err(e) => error!("Error handling connection from {addr}: {e}"),
            }
        });
    }

    async fn perform_shutdown(tasks: &mut JoinSet<()>) {
        info!("Waiting for {len} active connections to complete...", len = tasks.len());
        let drained = tokio::time::timeout(SHUTDOWN_GRACE, async {
            while let Some(res) = tasks.join_next().await {
                if let Err(e) = res {
                    error!("Task failed during shutdown: {e}");
                }
            }
        })
        .await;

        if drained.is_err() {
            warn!("Shutdown grace period elapsed, aborting {len} connections", len = tasks.len());
            tasks.abort_all();
        }
        info!("Server shutdown complete");
    }

    /// Serve a single request on `socket` and close it.
    ///
    /// The response is always written before an error is returned, so the
    /// error only tells the caller what went wrong for logging.
    pub async fn handle_connection(
        socket: &mut (impl AsyncRead + AsyncWrite + Unpin),
        routes: Arc<RwLock<Vec<Route>>>,
        cors: &CorsPolicy,
        read_buffer_size: usize,
    ) -> Result<(), Error> {
        let raw = read_request_head(&mut *socket, read_buffer_size).await?;
        if raw.is_empty() {
            return Ok(());
        }

        let request = match parse_request(&raw) {
            Ok(request) => request,
            Err(e) => {
                let response = HttpResponse::text(StatusCode::BadRequest, format!("Error parsing request: {e}"));
                write_response(&mut *socket, &response).await?;
                return Err(Error::ParseError(e));
            }
        };

        debug!("{} {}", request.method, request.path);

        if CorsPolicy::is_preflight(&request) {
            let response = cors.preflight(&request);
            return write_response(&mut *socket, &response).await;
        }

        let origin = request.origin().map(str::to_owned);
        let (mut response, outcome) = Self::dispatch(&routes, request).await;
        cors.apply(origin.as_deref(), &mut response);

        write_response(&mut *socket, &response).await?;
        outcome
    }

    /// Run the first route matching both path and method.
    async fn dispatch(routes: &RwLock<Vec<Route>>, mut request: HttpRequest) -> (HttpResponse, Result<(), Error>) {
        let routes = routes.read().await;

        let mut allowed: Vec<Method> = Vec::new();
        let mut matched = None;
        for route in routes.iter() {
            let Some(params) = route.pattern.matches(&request.path) else {
                continue;
            };
            if route.methods.contains(&request.method) {
                matched = Some((route.handler.clone(), params));
                break;
            }
            for method in &route.methods {
                if !allowed.contains(method) {
                    allowed.push(*method);
                }
            }
        }
        drop(routes);

        if let Some((handler, params)) = matched {
            request.params = params;
            return match handler(request).await {
                Ok(response) => (response, Ok(())),
                Err(e) => {
                    let response = HttpResponse::text(StatusCode::InternalServerError, format!("Internal server error: {e}"));
                    (response, Err(e))
                }
            };
        }

        if allowed.is_empty() {
            let response = HttpResponse::text(StatusCode::NotFound, format!("Not found: {}", request.path));
            return (response, Err(Error::NotFound(request.path)));
        }

        let allowed = allowed.iter().map(Method::as_str).collect::<Vec<_>>().join(", ");
        let response = HttpResponse::text(
            StatusCode::MethodNotAllowed,
            format!(
                "Method {method} not allowed for path: {path}. Allowed methods: {allowed}",
                method = request.method,
                path = request.path,
            ),
        )
        .with_header("Allow", allowed);
        (response, Err(Error::MethodNotAllowed(request.method, request.path)))
    }
}

/// Read until the end of the header block, EOF, or a full buffer.
async fn read_request_head(socket: &mut (impl AsyncRead + Unpin), read_buffer_size: usize) -> Result<Vec<u8>, Error> {
    let mut buf = vec![0; read_buffer_size];
    let mut filled = 0;

    while filled < buf.len() {
        let n = socket.read(&mut buf[filled..]).await?;
        if n == 0 {
            break;
        }
        filled += n;
        if buf[..filled].windows(4).any(|window| window == b"\r\n\r\n") {
            break;
        }
    }

    buf.truncate(filled);
    Ok(buf)
}

async fn write_response(socket: &mut (impl AsyncWrite + Unpin), response: &HttpResponse) -> Result<(), Error> {
    socket.write_all(&response.to_bytes()).await?;
    socket.shutdown().await?;
    Ok(())
}
