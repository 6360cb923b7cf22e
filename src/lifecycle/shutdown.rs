//! Stop trigger for the HTTP server.
//!
//! A `watch` channel holds a single "stopped" flag. Waiters created after
//! the trigger fired still see it, and dropping the [`Shutdown`] releases
//! every waiter as well.

use std::future::Future;

use tokio::sync::watch;

/// One-shot stop switch shared between the signal handler (or a test) and the server.
#[derive(Debug)]
pub struct Shutdown {
    stopped: watch::Sender<bool>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (stopped, _) = watch::channel(false);
        Self { stopped }
    }

    /// Flip the flag. Calling it again has no further effect.
    pub fn trigger(&self) {
        self.stopped.send_replace(true);
    }

    pub fn is_triggered(&self) -> bool {
        *self.stopped.borrow()
    }

    /// Future that resolves once [`Shutdown::trigger`] has been called or
    /// this coordinator is dropped. Suitable for `HttpServer::run`.
    pub fn signal(&self) -> impl Future<Output = ()> + Send + 'static {
        let mut stopped = self.stopped.subscribe();
        async move {
            let _ = stopped.wait_for(|stopped| *stopped).await;
        }
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
