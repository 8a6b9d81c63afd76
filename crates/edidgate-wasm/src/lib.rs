//! Buffer-based exports for script hosts.
//!
//! The host writes descriptor bytes straight into the staging area returned
//! by `get_edid_buffer`, then calls `parse_edid_buffer` with the number of
//! bytes written. No filesystem is involved.
//!
//! One dispatcher lives for the whole process. Calls are serialised through
//! a mutex; a call that arrives while another is running is refused with
//! `-1` instead of blocking, since hosts are expected to serialise already.
//!
//! Rejection diagnostics go to stderr through a `tracing` subscriber that
//! the first export call installs, unless the host process already has one.

use std::ptr::NonNull;
use std::sync::{Mutex, MutexGuard, OnceLock, TryLockError};

use edidgate_core::{ChecksumEngine, Dispatcher, STATUS_REJECTED};

type HostDispatcher = Dispatcher<ChecksumEngine>;

static DISPATCHER: OnceLock<Mutex<HostDispatcher>> = OnceLock::new();

fn dispatcher() -> &'static Mutex<HostDispatcher> {
    DISPATCHER.get_or_init(|| {
        init_diagnostics();
        Mutex::new(Dispatcher::new(ChecksumEngine::new()))
    })
}

fn init_diagnostics() {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

/// Lock without blocking. A poisoned lock is recovered: every parse resets
/// decoder state before doing anything else.
fn try_lock() -> Option<MutexGuard<'static, HostDispatcher>> {
    match dispatcher().try_lock() {
        Ok(guard) => Some(guard),
        Err(TryLockError::Poisoned(poisoned)) => Some(poisoned.into_inner()),
        Err(TryLockError::WouldBlock) => None,
    }
}

fn lock() -> MutexGuard<'static, HostDispatcher> {
    dispatcher()
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Start of the staging area. Stable for the lifetime of the process.
#[unsafe(no_mangle)]
pub extern "C" fn get_edid_buffer() -> *mut u8 {
    let address: NonNull<u8> = lock().buffer_address();
    address.as_ptr()
}

/// Staging capacity in bytes.
#[unsafe(no_mangle)]
pub extern "C" fn get_edid_buffer_size() -> u32 {
    u32::try_from(HostDispatcher::CAPACITY).unwrap_or(u32::MAX)
}

/// Validate and parse the first `len` staged bytes.
///
/// Returns the engine's status, or `-1` when the envelope is rejected or
/// another call is in progress.
#[unsafe(no_mangle)]
pub extern "C" fn parse_edid_buffer(len: u32) -> i32 {
    let Some(mut dispatcher) = try_lock() else {
        tracing::error!("parse_edid_buffer called while a parse is in progress");
        return STATUS_REJECTED;
    };
    dispatcher.parse(len as usize)
}

/// Recorded block count of the most recent call (0 after a rejection).
#[unsafe(no_mangle)]
pub extern "C" fn get_edid_block_count() -> u32 {
    u32::try_from(lock().state().num_blocks).unwrap_or(u32::MAX)
}

/// Failures logged by the engine during the most recent call.
#[unsafe(no_mangle)]
pub extern "C" fn get_edid_failure_count() -> u32 {
    u32::try_from(lock().state().failures).unwrap_or(u32::MAX)
}
