use clap::Parser;

pub mod dispatcher;
pub mod handlers;
pub mod host;

/// ANSI style for each markup tag used in `cli.help.template`.
const HELP_TAGS: [(&str, &str); 4] = [
    ("title", "\x1b[1;33m"),
    ("cmd", "\x1b[36m"),
    ("group", "\x1b[1;32m"),
    ("dim", "\x1b[2m"),
];

/// Renders the translated help template, stripping the markup when colors are off.
fn render_help(template: &str, use_colors: bool) -> String {
    HELP_TAGS
        .iter()
        .fold(template.to_string(), |text, (tag, style)| {
            let (open, close) = if use_colors { (*style, "\x1b[0m") } else { ("", "") };
            text.replace(&format!("<{}>", tag), open)
                .replace(&format!("</{}>", tag), close)
        })
}

fn help_template() -> &'static str {
    let rendered = render_help(
        t!("cli.help.template"),
        colored::control::SHOULD_COLORIZE.should_colorize(),
    );
    Box::leak(rendered.into_boxed_str())
}

/// openvim: open the file you are editing in Vim, right where your cursor is.
#[derive(Parser, Debug)]
#[command(author, version, about, help_template = { help_template() })]
// The help template lists every action, so clap's `help` subcommand is not needed.
#[command(disable_help_subcommand = true)]
#[command(trailing_var_arg = true)]
pub struct Cli {
    /// The action followed by its arguments. Parsed by each handler.
    #[arg(allow_hyphen_values = true)]
    pub args: Vec<String>,
}
