// src/core/command_builder.rs

use crate::core::launcher::LaunchError;

/// Wraps `value` in POSIX single quotes. Embedded quotes become `'\''`.
pub fn single_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}

/// Rejects values that would put a double quote into a generated command.
///
/// Launch commands end up inside double-quoted strings (AppleScript, `tilix -e`),
/// so a `"` anywhere in them would break out of the quoting.
pub fn ensure_no_double_quote(value: &str) -> Result<(), LaunchError> {
    if value.contains('"') {
        return Err(LaunchError::ForbiddenQuote(value.to_string()));
    }
    Ok(())
}

/// Builds the Vim arguments that place the cursor and, when `restore_with` names
/// a host editor command, sync the cursor back to it when Vim exits.
pub fn build_vim_args(line: u32, column: u32, restore_with: Option<&str>) -> Result<String, LaunchError> {
    let mut args = vec![single_quote(&format!("+call cursor({}, {})", line, column))];

    if let Some(host_editor) = restore_with {
        ensure_no_double_quote(host_editor)?;
        // Vim single-quoted strings escape `'` by doubling it.
        let host_editor = host_editor.replace('\'', "''");
        // `shellescape()` is called without `{special}`, so `:!` still expands `%`, `#`
        // and `!` in the file path (`a#b.txt`). Check each shell before changing it.
        let hook = format!(
            "+autocmd VimLeavePre * execute 'silent !{} --goto ' . shellescape(expand('%:p') . ':' . line('.') . ':' . col('.'))",
            host_editor
        );
        args.push(single_quote(&hook));
    }

    let args = args.join(" ");
    ensure_no_double_quote(&args)?;
    Ok(args)
}

/// `<editor> '<file>' <args>`, followed by `; exit` when the cursor is synced back
/// so that the terminal session ends together with Vim.
pub fn build_editor_command(editor: &str, file_path: &str, vim_args: &str, restore_cursor: bool) -> String {
    let mut command = format!("{} {} {}", editor, single_quote(file_path), vim_args);
    if restore_cursor {
        command.push_str("; exit");
    }
    command
}

/// The body of a launch script: enter the workspace, then run the editor.
pub fn build_launch_script(workspace_dir: &str, editor_command: &str) -> String {
    format!("cd {}\n{}\n", single_quote(workspace_dir), editor_command)
}
