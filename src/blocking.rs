//! Run-to-completion bridge for synchronous call sites.
//!
//! The chat loop is synchronous; the provider stack is async. Rather than
//! sniffing for an ambient runtime and falling back, [`run_to_completion`]
//! always builds a dedicated current-thread runtime on its own thread and
//! drives the future to the end there. One runtime per call, torn down when
//! the call returns; the result is the same whether the caller is a plain
//! function or sits inside an active runtime.

use std::future::Future;

use crate::error::AppError;

/// Block until `future` completes on a dedicated single-thread runtime.
pub fn run_to_completion<F>(future: F) -> Result<F::Output, AppError>
where
    F: Future + Send,
    F::Output: Send,
{
    std::thread::scope(|scope| {
        scope
            .spawn(move || {
                let runtime = tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                    .map_err(|e| AppError::Runtime(format!("failed to build runtime: {e}")))?;
                Ok(runtime.block_on(future))
            })
            .join()
            .map_err(|_| AppError::Runtime("bridge thread panicked".into()))?
    })
}
