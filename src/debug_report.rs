use traiter::engine::PassTrace;
use traiter::Trait;

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

pub fn print_run(input: &str, traits: &[Trait], traces: &[(&'static str, Vec<PassTrace>)], color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Parsing: \"{}\"", input), ansi::CYAN)));

    if !traces.is_empty() {
        println!("\n{}", palette.paint("━━━ Rule Trace ━━━", ansi::GRAY));
        print_traces(input, traces, &palette);
    }

    println!("\n{}", palette.paint("━━━ Traits ━━━", ansi::GRAY));
    if traits.is_empty() {
        println!("{}", palette.dim("  No traits produced"));
        println!("\n{}", palette.paint("Possible reasons:", ansi::YELLOW));
        println!("  • No trait family's keyword vocabulary matched this text");
        println!("  • A fix-up veto discarded every candidate");
        println!("  • A replacer/grouper rewrote tokens past what any producer pattern matches");
        println!("\n{}", palette.dim("  Tip: Set TRAITER_DEBUG_RULES=1 to see the token stream at each pass"));
    } else {
        print_traits(input, traits, &palette);
    }
    println!();
}

fn print_traces(input: &str, traces: &[(&'static str, Vec<PassTrace>)], palette: &ansi::Palette) {
    for (family, passes) in traces {
        let any_tokens = passes.iter().any(|p| !p.tokens.is_empty());
        if !any_tokens {
            continue;
        }
        println!("  {}", palette.bold(palette.paint(*family, ansi::BLUE)));
        for pass in passes {
            println!(
                "    {} {}",
                palette.paint(format!("{}:", pass.stage), ansi::CYAN),
                if pass.tokens.is_empty() {
                    palette.dim("0 tokens".to_string())
                } else {
                    palette.paint(format!("{} tokens", pass.tokens.len()), ansi::GREEN)
                }
            );
            for token in pass.tokens.iter().take(8) {
                println!(
                    "      {} {} {}",
                    palette.paint(format!("{}..{}", token.range.start, token.range.end), ansi::YELLOW),
                    palette.paint(token.rule_name, ansi::BLUE),
                    palette.dim(format!("{:?}", token.text(input)))
                );
            }
            if pass.tokens.len() > 8 {
                println!("      {}", palette.dim(format!("... +{} more", pass.tokens.len() - 8)));
            }
        }
    }
}

fn print_traits(input: &str, traits: &[Trait], palette: &ansi::Palette) {
    for (idx, t) in traits.iter().enumerate() {
        let value = t.value_text.clone().unwrap_or_else(|| format!("{:?}", t.value));
        println!(
            "  {} {} {} {}",
            palette.paint(format!("[{}]", idx), ansi::GRAY),
            palette.bold(palette.paint(t.kind, ansi::GREEN)),
            palette.dim("│"),
            palette.paint(format!("span {}..{}", t.start(), t.end()), ansi::YELLOW),
        );
        println!(
            "      {} {}  {} {}",
            palette.dim("value:"),
            palette.paint(value, ansi::CYAN),
            palette.dim("│ text:"),
            palette.dim(format!("{:?}", t.range.slice(input)))
        );
        if let Some(units) = t.units {
            println!(
                "      {} {}{}",
                palette.dim("units:"),
                palette.paint(units, ansi::BLUE),
                if t.units_inferred { palette.dim(" (inferred)") } else { String::new() }
            );
        }
    }
}
