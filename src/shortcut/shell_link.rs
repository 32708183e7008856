//! COM `IShellLinkW` shortcut writer
//!
//! Creates a `ShellLink` instance, fills in target, arguments, working
//! directory and icon location, then persists it through `IPersistFile`.

use crate::error::Result;
use crate::shortcut::ShortcutRequest;
use std::ffi::OsStr;
use std::os::windows::ffi::OsStrExt;
use tracing::debug;
use windows::Win32::System::Com::{
    CLSCTX_INPROC_SERVER, COINIT_APARTMENTTHREADED, CoCreateInstance, CoInitializeEx,
    CoUninitialize, IPersistFile,
};
use windows::Win32::UI::Shell::{IShellLinkW, ShellLink};
use windows::core::{Interface, PCWSTR};

/// RAII guard for COM initialization on the calling thread
struct ComGuard;

impl ComGuard {
    fn new() -> Result<Self> {
        // S_FALSE (already initialized) still requires the matching
        // CoUninitialize, so the guard is constructed either way.
        unsafe { CoInitializeEx(None, COINIT_APARTMENTTHREADED).ok()? };
        Ok(Self)
    }
}

impl Drop for ComGuard {
    fn drop(&mut self) {
        unsafe { CoUninitialize() };
    }
}

/// Encode a UTF-16 nul-terminated buffer for Windows APIs
fn wide(value: &OsStr) -> Vec<u16> {
    value.encode_wide().chain(std::iter::once(0)).collect()
}

pub fn write_shell_link(request: &ShortcutRequest) -> Result<()> {
    let _com = ComGuard::new()?;

    unsafe {
        let shell_link: IShellLinkW = CoCreateInstance(&ShellLink, None, CLSCTX_INPROC_SERVER)?;

        let target = wide(request.target.as_os_str());
        shell_link.SetPath(PCWSTR(target.as_ptr()))?;

        let arguments = wide(OsStr::new(&request.arguments));
        shell_link.SetArguments(PCWSTR(arguments.as_ptr()))?;

        let working_dir = wide(request.working_dir.as_os_str());
        shell_link.SetWorkingDirectory(PCWSTR(working_dir.as_ptr()))?;

        if let Some(icon) = &request.icon {
            // Index 0: the generated .ico holds exactly one image.
            let icon_path = wide(icon.as_os_str());
            shell_link.SetIconLocation(PCWSTR(icon_path.as_ptr()), 0)?;
        }

        let persist_file: IPersistFile = shell_link.cast()?;
        let link_path = wide(request.link_path.as_os_str());
        persist_file.Save(PCWSTR(link_path.as_ptr()), true.into())?;
    }

    debug!("shortcut written to {}", request.link_path.display());
    Ok(())
}
