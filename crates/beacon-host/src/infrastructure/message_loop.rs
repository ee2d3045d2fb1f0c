//! The process's main event loop.
//!
//! On Windows this is a standard `GetMessageW` / `DispatchMessageW` loop.
//! The low-level keyboard hook is serviced from inside `GetMessageW`, so this
//! loop must run on the thread that installed the hook.  Quit is delivered as
//! a `WM_QUIT` posted to that thread.
//!
//! Elsewhere there is no hook to service and the loop simply waits on the
//! [`QuitHandle`].
//!
//! Ctrl-C requests quit through a small `tokio` runtime on a helper thread.

use std::sync::Arc;
use std::thread;

use tracing::{error, info};

use crate::application::host_app::QuitHandle;

/// Runs until `quit` is requested.
pub fn run_message_loop(quit: &QuitHandle) {
    info!("entering message loop");

    #[cfg(target_os = "windows")]
    win32::run(quit);

    #[cfg(not(target_os = "windows"))]
    quit.wait();

    quit.clear_waker();
    info!("message loop exited");
}

/// Spawns a helper thread that requests quit on Ctrl-C.
///
/// # Errors
///
/// Returns the I/O error if the thread or its runtime cannot be created.
pub fn spawn_ctrl_c_listener(quit: Arc<QuitHandle>) -> std::io::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    thread::Builder::new()
        .name("beacon-ctrl-c".to_string())
        .spawn(move || {
            runtime.block_on(async {
                match tokio::signal::ctrl_c().await {
                    Ok(()) => {
                        info!("received Ctrl+C, shutting down");
                        quit.request();
                    }
                    Err(e) => error!("failed to listen for Ctrl+C signal: {e}"),
                }
            });
        })?;
    Ok(())
}

#[cfg(target_os = "windows")]
mod win32 {
    use std::sync::Arc;

    use tracing::{debug, warn};
    use windows::Win32::Foundation::{LPARAM, WPARAM};
    use windows::Win32::System::Threading::GetCurrentThreadId;
    use windows::Win32::UI::WindowsAndMessaging::{
        DispatchMessageW, GetMessageW, PeekMessageW, PostThreadMessageW, TranslateMessage, MSG,
        PM_NOREMOVE, WM_QUIT, WM_USER,
    };

    use crate::application::host_app::QuitHandle;

    pub(super) fn run(quit: &QuitHandle) {
        let mut msg = MSG::default();

        // SAFETY: PeekMessageW forces creation of this thread's message
        // queue so a WM_QUIT posted from another thread is not lost.
        unsafe {
            let _ = PeekMessageW(&mut msg, None, WM_USER, WM_USER, PM_NOREMOVE);
        }

        // SAFETY: GetCurrentThreadId has no preconditions.
        let thread_id = unsafe { GetCurrentThreadId() };
        let already_quit = quit.set_waker(Arc::new(move || {
            // SAFETY: posting to a thread id we read from the loop thread;
            // failure only means the loop is already gone.
            if let Err(e) = unsafe { PostThreadMessageW(thread_id, WM_QUIT, WPARAM(0), LPARAM(0)) } {
                warn!("failed to post WM_QUIT: {e}");
            }
        }));
        if already_quit {
            return;
        }

        // SAFETY: Standard Win32 GetMessage/DispatchMessage loop pattern.
        // GetMessageW returns 0 on WM_QUIT and -1 on error.
        unsafe {
            loop {
                let result = GetMessageW(&mut msg, None, 0, 0);
                if result.0 <= 0 {
                    debug!("GetMessageW returned {}", result.0);
                    break;
                }
                let _ = TranslateMessage(&msg);
                DispatchMessageW(&msg);
            }
        }
    }
}
