//! AppleScript generation and execution for compiled shortcuts.

use super::compile::{compile, KeyIdentifier};
use crate::aerospace::process::{self, DEFAULT_TIMEOUT};
use crate::traits::ScriptRunner;
use log::{debug, info, warn};

/// Escape a string for use inside an AppleScript string literal.
pub fn applescript_escape(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
}

/// Build the System Events script that synthesizes `token`.
///
/// The script returns a confirmation naming the token, the modifiers as
/// written (or `none`) and the key.
pub fn build_script(token: &str) -> String {
    let compiled = compile(token);

    let mut action = match &compiled.key {
        KeyIdentifier::ResolvedCode(code) => format!("key code {}", code),
        KeyIdentifier::LiteralText(text) => format!("keystroke \"{}\"", applescript_escape(text)),
    };
    if !compiled.modifiers.is_empty() {
        let flags: Vec<&str> = compiled.modifiers.iter().map(|m| m.applescript()).collect();
        action = format!("{} using {{{}}}", action, flags.join(", "));
    }

    let modifier_label = if compiled.raw_modifiers.is_empty() {
        "none".to_string()
    } else {
        compiled.raw_modifiers.join(" ")
    };
    let confirmation = format!("Executed: {}({} - {})", token, modifier_label, compiled.raw_key);

    format!(
        "tell application \"System Events\"\n    {}\n    return \"{}\"\nend tell",
        action,
        applescript_escape(&confirmation)
    )
}

/// Error from running an AppleScript.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error(transparent)]
    Command(#[from] process::CommandError),
    /// `osascript` exited non-zero; carries its diagnostic.
    #[error("{0}")]
    Failed(String),
}

/// [`ScriptRunner`] that hands scripts to `osascript -e`.
#[derive(Debug, Default)]
pub struct Osascript;

impl ScriptRunner for Osascript {
    type Error = ScriptError;

    fn run(&self, script: &str) -> Result<String, ScriptError> {
        debug!("running AppleScript ({} bytes)", script.len());
        let output = process::run_with_timeout("osascript", &["-e", script], DEFAULT_TIMEOUT)?;
        if !output.status.success() {
            return Err(ScriptError::Failed(process::failure_message(
                &output.stderr,
                &output.stdout,
                "AppleScript failed.",
            )));
        }
        Ok(output.stdout.trim().to_string())
    }
}

/// Synthesize `token` through `runner` and return the script's
/// confirmation text.
pub fn execute_shortcut<R: ScriptRunner>(runner: &R, token: &str) -> Result<String, R::Error> {
    info!("executing shortcut {}", token);
    runner.run(&build_script(token))
}

/// Post a Notification Center banner.  Failures are logged, never returned.
pub fn notify<R: ScriptRunner>(runner: &R, title: &str, message: &str) {
    let script = format!(
        "display notification \"{}\" with title \"{}\"",
        applescript_escape(message),
        applescript_escape(title)
    );
    if let Err(e) = runner.run(&script) {
        warn!("notification failed: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::mock::MockRunner;

    #[test]
    fn escape_quotes_and_backslashes() {
        assert_eq!(applescript_escape(r#"a"b\c"#), r#"a\"b\\c"#);
        assert_eq!(applescript_escape("x\ny"), "x\\ny");
    }

    #[test]
    fn script_for_resolved_key_with_modifiers() {
        let script = build_script("cmd-shift-4");
        assert_eq!(
            script,
            "tell application \"System Events\"\n\
             \x20   key code 21 using {command down, shift down}\n\
             \x20   return \"Executed: cmd-shift-4(cmd shift - 4)\"\n\
             end tell"
        );
    }

    #[test]
    fn script_without_modifiers_omits_using_clause() {
        let script = build_script("escape");
        assert!(script.contains("    key code 53\n"));
        assert!(!script.contains("using"));
        assert!(script.contains("Executed: escape(none - escape)"));
    }

    #[test]
    fn script_for_literal_key_uses_keystroke() {
        let script = build_script("ctrl-æ");
        assert!(script.contains("keystroke \"æ\" using {control down}"));
    }

    #[test]
    fn literal_text_is_escaped() {
        let script = build_script("alt-say\"hi\"");
        assert!(script.contains(r#"keystroke "say\"hi\"" using {option down}"#));
    }

    #[test]
    fn unrecognized_modifiers_appear_in_label_only() {
        let script = build_script("hyper-k");
        assert!(script.contains("    key code 40\n"));
        assert!(script.contains("(hyper - k)"));
    }

    #[test]
    fn execute_runs_built_script() {
        let runner = MockRunner::default();
        let out = execute_shortcut(&runner, "alt-j").unwrap();
        assert_eq!(out, "ok");
        assert_eq!(runner.scripts.borrow()[0], build_script("alt-j"));
    }

    #[test]
    fn execute_reports_runner_error_verbatim() {
        let runner = MockRunner {
            fail_with: Some("not allowed to send keystrokes".into()),
            ..MockRunner::default()
        };
        let err = execute_shortcut(&runner, "alt-j").unwrap_err();
        assert_eq!(err.to_string(), "not allowed to send keystrokes");
    }

    #[test]
    fn notify_swallows_errors() {
        let runner = MockRunner {
            fail_with: Some("denied".into()),
            ..MockRunner::default()
        };
        notify(&runner, "AeroSpace", "Executed \"x\"");
        assert_eq!(
            runner.scripts.borrow()[0],
            r#"display notification "Executed \"x\"" with title "AeroSpace""#
        );
    }
}
