use axum::Router;
use tokio::net::TcpListener;

/// Serve a stub of the student REST backend on an ephemeral port and
/// return its base url.
pub async fn spawn_backend(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("unable to bind stub backend");
    let addr = listener.local_addr().expect("stub backend has no addr");

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("stub backend died");
    });

    format!("http://{addr}")
}
