//! Silent launcher script
//!
//! Shortcuts do not target scrcpy directly: launching a console program
//! from a shortcut flashes a console window. Instead the shortcut targets
//! a small VBScript wrapper that first checks a device is attached (with a
//! message box when none is) and then runs scrcpy detached from any
//! console, forwarding the shortcut's arguments.

use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Filename of the wrapper script inside the resources directory
pub const LAUNCHER_FILE_NAME: &str = "scrcpy-noconsole.vbs";

/// Wrapper script body; kept byte-stable so rewrites are detectable
const LAUNCHER_SCRIPT: &str = concat!(
    "On Error Resume Next\r\n",
    "devicesOut = \"\"\r\n",
    "Set execObj = CreateObject(\"WScript.Shell\").Exec(\"cmd /c adb.exe devices\")\r\n",
    "If Not execObj Is Nothing Then devicesOut = execObj.StdOut.ReadAll\r\n",
    "On Error GoTo 0\r\n",
    "hasDevice = False\r\n",
    "lines = Split(devicesOut, vbNewLine)\r\n",
    "For Each l In lines\r\n",
    "    l = Trim(l)\r\n",
    "    If l <> \"\" And InStr(l, \"List of devices attached\") = 0 Then\r\n",
    "        If InStr(l, \"device\") > 0 Then\r\n",
    "            hasDevice = True\r\n",
    "            Exit For\r\n",
    "        End If\r\n",
    "    End If\r\n",
    "Next\r\n",
    "If Not hasDevice Then\r\n",
    "    MsgBox \"No device connected via USB. Please connect a device and enable USB debugging.\", vbExclamation, \"No Device\"\r\n",
    "    WScript.Quit\r\n",
    "End If\r\n",
    "\r\n",
    "strCommand = \"cmd /c scrcpy.exe\"\r\n",
    "For Each Arg In WScript.Arguments\r\n",
    "    strCommand = strCommand & \" \"\"\" & Replace(Arg, \"\"\"\", \"\"\"\"\"\") & \"\"\"\"\r\n",
    "Next\r\n",
    "CreateObject(\"Wscript.Shell\").Run strCommand, 0, false\r\n",
);

/// Ensure the wrapper script exists in `resources_dir` and is current
///
/// Writes the script when missing or when an older version's content
/// differs. Returns the script path for use as a shortcut target.
pub fn ensure_silent_launcher(resources_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(resources_dir)?;
    let script_path = resources_dir.join(LAUNCHER_FILE_NAME);

    let current = std::fs::read_to_string(&script_path).ok();
    if current.as_deref() != Some(LAUNCHER_SCRIPT) {
        std::fs::write(&script_path, LAUNCHER_SCRIPT)?;
        debug!("silent launcher written to {}", script_path.display());
    }

    Ok(script_path)
}
