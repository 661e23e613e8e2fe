use std::io::{Read, Write};

use anyhow::{Context, Result, bail};
use rune_bidi::bidi::BidiClass;
use rune_bidi::{
    BidiSubranges, HardLineBreaks, LineBreaker, WrapMode, WrappingLineBreaks, bidi_class,
    bidi_levels,
};
use rune_config::{RuneConfig, WrapModeConfig};

const USAGE: &str = "usage: rune-reorder [--level=0|1|auto] [--width=N] [--wrap=none|word|all] \
[--no-mirror] [--levels] [--mark-breaks] [TEXT...]";

/// Marker printed before a newline taken at a break opportunity.
const ALLOWED_MARK: char = '\u{21A9}';
/// Marker printed before a mandatory newline.
const HARD_MARK: char = '\u{23CE}';

/// Apply command line flags on top of the loaded configuration and
/// return the positional text, if any.
fn parse_args(config: &mut RuneConfig, args: impl Iterator<Item = String>) -> Result<Option<String>> {
    let mut words: Vec<String> = Vec::new();
    for arg in args {
        if !words.is_empty() || !arg.starts_with("--") {
            words.push(arg);
            continue;
        }
        match arg.split_once('=') {
            Some(("--level", "auto")) => config.bidi.paragraph_level = None,
            Some(("--level", level)) => {
                let level: u8 = level.parse().with_context(|| format!("invalid level {level:?}"))?;
                config.bidi.paragraph_level = Some(level);
            }
            Some(("--width", width)) => {
                let width: usize = width.parse().with_context(|| format!("invalid width {width:?}"))?;
                config.bidi.line_width = Some(width);
            }
            Some(("--wrap", mode)) => {
                config.bidi.wrap = WrapModeConfig::parse(mode)
                    .with_context(|| format!("invalid wrap mode {mode:?}"))?;
            }
            None if arg == "--no-mirror" => config.bidi.mirroring = false,
            None if arg == "--levels" => config.output.show_levels = true,
            None if arg == "--mark-breaks" => config.output.mark_breaks = true,
            None if arg == "--help" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            // Everything after a bare `--` is text.
            None if arg == "--" => words.push(String::new()),
            _ => bail!("unknown option {arg}\n{USAGE}"),
        }
    }
    if words.first().is_some_and(|w| w.is_empty()) {
        words.remove(0);
        if words.is_empty() {
            return Ok(None);
        }
    }
    Ok((!words.is_empty()).then(|| words.join(" ")))
}

fn wrap_mode(config: WrapModeConfig) -> WrapMode {
    match config {
        WrapModeConfig::None => WrapMode::NoWrap,
        WrapModeConfig::Word => WrapMode::BreakWord,
        WrapModeConfig::All => WrapMode::BreakAll,
    }
}

/// Visual text, one output line per emitted line.
fn render<B: LineBreaker>(subranges: BidiSubranges<'_, B>, mark_breaks: bool) -> String {
    let mut out = String::new();
    for subrange in subranges {
        out.extend(subrange.chars().filter(|&c| bidi_class(c) != BidiClass::B));
        if subrange.is_line_break() {
            if mark_breaks {
                out.push(if subrange.is_hard_break() { HARD_MARK } else { ALLOWED_MARK });
            }
            out.push('\n');
        }
    }
    out
}

/// Resolved levels, one line per input line, `x` for removed characters.
fn render_levels(text: &[char], level: Option<u8>) -> Result<String> {
    let levels = bidi_levels(text, level)?;
    let mut out = String::new();
    let mut line: Vec<String> = Vec::new();
    for (&c, level) in text.iter().zip(levels) {
        if bidi_class(c) == BidiClass::B {
            out.push_str(&line.join(" "));
            out.push('\n');
            line.clear();
            continue;
        }
        line.push(level.map_or_else(|| "x".to_string(), |l| l.to_string()));
    }
    if !line.is_empty() {
        out.push_str(&line.join(" "));
        out.push('\n');
    }
    Ok(out)
}

fn main() -> Result<()> {
    env_logger::init();

    let mut config = RuneConfig::load();
    let text = match parse_args(&mut config, std::env::args().skip(1))? {
        Some(text) => text,
        None => {
            let mut input = String::new();
            std::io::stdin().read_to_string(&mut input).context("failed to read stdin")?;
            input
        }
    };
    log::debug!("config: {config:?}");

    let chars: Vec<char> = text.chars().collect();
    let level = config.bidi.paragraph_level;
    let output = if config.output.show_levels {
        render_levels(&chars, level)?
    } else if let Some(width) = config.bidi.line_width {
        let breaker = WrappingLineBreaks::new(width, wrap_mode(config.bidi.wrap));
        let subranges = BidiSubranges::new(&chars, level, breaker)?.with_mirroring(config.bidi.mirroring);
        render(subranges, config.output.mark_breaks)
    } else {
        let subranges =
            BidiSubranges::new(&chars, level, HardLineBreaks::new())?.with_mirroring(config.bidi.mirroring);
        render(subranges, config.output.mark_breaks)
    };

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
