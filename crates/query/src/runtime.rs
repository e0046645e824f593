//! Timer and task seams for the cache.
//!
//! The cache itself is single-threaded (one UI event loop); these traits
//! only abstract over *where* that loop lives. Futures are deliberately
//! not `Send`.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

pub type LocalFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Async timer.
pub trait Sleep {
    fn sleep(&self, duration: Duration) -> LocalFuture<'_, ()>;
}

/// Fire-and-forget background task execution.
pub trait Spawn {
    fn spawn(&self, task: LocalFuture<'static, ()>);
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// tokio-backed timer for native shells and integration tests.
    #[derive(Debug, Default)]
    pub struct TokioSleep;

    impl Sleep for TokioSleep {
        fn sleep(&self, duration: Duration) -> LocalFuture<'_, ()> {
            Box::pin(tokio::time::sleep(duration))
        }
    }

    /// Zero-delay timer so retry tests do not actually wait.
    #[derive(Debug, Default)]
    pub struct InstantSleep;

    impl Sleep for InstantSleep {
        fn sleep(&self, _duration: Duration) -> LocalFuture<'_, ()> {
            Box::pin(async {})
        }
    }

    /// Deterministic spawner: queues background tasks until the test
    /// drives them with [`ManualSpawn::run_all`].
    #[derive(Default)]
    pub struct ManualSpawn {
        tasks: RefCell<VecDeque<LocalFuture<'static, ()>>>,
    }

    impl ManualSpawn {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn pending(&self) -> usize {
            self.tasks.borrow().len()
        }

        /// Run queued tasks to completion, including tasks they enqueue.
        pub async fn run_all(&self) {
            loop {
                let task = self.tasks.borrow_mut().pop_front();
                match task {
                    Some(task) => task.await,
                    None => break,
                }
            }
        }
    }

    impl Spawn for ManualSpawn {
        fn spawn(&self, task: LocalFuture<'static, ()>) {
            self.tasks.borrow_mut().push_back(task);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::{InstantSleep, ManualSpawn, TokioSleep};

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::*;
    use wasm_bindgen_futures::JsFuture;

    /// `setTimeout`-backed timer.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct BrowserSleep;

    impl Sleep for BrowserSleep {
        fn sleep(&self, duration: Duration) -> LocalFuture<'_, ()> {
            let millis = duration.as_millis().min(i32::MAX as u128) as i32;
            Box::pin(async move {
                let promise = js_sys::Promise::new(&mut |resolve, _reject| {
                    if let Some(window) = web_sys::window() {
                        let _ = window
                            .set_timeout_with_callback_and_timeout_and_arguments_0(
                                &resolve, millis,
                            );
                    }
                });
                let _ = JsFuture::from(promise).await;
            })
        }
    }

    /// Browser event-loop spawner.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct BrowserSpawn;

    impl Spawn for BrowserSpawn {
        fn spawn(&self, task: LocalFuture<'static, ()>) {
            wasm_bindgen_futures::spawn_local(task);
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::{BrowserSleep, BrowserSpawn};
