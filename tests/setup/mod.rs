#![allow(dead_code)]

use std::panic::{UnwindSafe, catch_unwind};
use std::sync::Once;

use mathwords::{InputFormat, MathwordsError, Settings, parse_tree, verbalize_with_settings};

static LOGGER: Once = Once::new();

/// Installs `env_logger` once so `RUST_LOG=mathwords=trace` shows the
/// verbalizer's diagnostics while a test runs.
pub fn init_logger() {
    LOGGER.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

pub struct TestExpr {
    pub expr: String,
    pub file: &'static str,
    pub line: u32,
    pub code: &'static str,
}

impl TestExpr {
    fn origin(&self) -> String {
        format!("{}:{} `{}`", self.file, self.line, self.code)
    }

    pub fn to_parse(self, settings: &Settings) -> Result<(), MathwordsError> {
        parse_tree(&self.expr, settings).map(|_| ())
    }

    pub fn not_to_parse(self, settings: &Settings) -> Result<(), MathwordsError> {
        if let Ok(tree) = parse_tree(&self.expr, settings) {
            panic!(
                "expected {:?} not to parse ({}), got {tree:#?}",
                self.expr,
                self.origin()
            );
        }
        Ok(())
    }

    pub fn to_parse_like(self, other: &str, settings: &Settings) -> Result<(), MathwordsError> {
        let tree1 = parse_tree(&self.expr, settings)?;
        let tree2 = parse_tree(other, settings)?;
        assert_eq!(
            tree1,
            tree2,
            "Parse trees do not match between '{}' and '{}' ({})",
            self.expr,
            other,
            self.origin()
        );
        Ok(())
    }

    pub fn to_speak(self, expected: &str, settings: &Settings) -> Result<(), MathwordsError> {
        let speech = verbalize_with_settings(&self.expr, settings)?;
        assert_eq!(speech, expected, "speech of {:?} ({})", self.expr, self.origin());
        Ok(())
    }

    pub fn to_speak_like(self, other: &str, settings: &Settings) -> Result<(), MathwordsError> {
        let speech1 = verbalize_with_settings(&self.expr, settings)?;
        let speech2 = verbalize_with_settings(other, settings)?;
        assert_eq!(
            speech1,
            speech2,
            "speech differs between '{}' and '{}' ({})",
            self.expr,
            other,
            self.origin()
        );
        Ok(())
    }

    /// Compares MathML input against the LaTeX spelling of the same
    /// expression, read with otherwise identical settings.
    pub fn to_speak_like_latex(self, latex: &str, settings: &Settings) -> Result<(), MathwordsError> {
        let speech1 = verbalize_with_settings(&self.expr, settings)?;
        let latex_settings = Settings {
            input_format: InputFormat::Latex,
            ..settings.clone()
        };
        let speech2 = verbalize_with_settings(latex, &latex_settings)?;
        assert_eq!(
            speech1,
            speech2,
            "speech differs between {:?} and '{}' ({})",
            self.expr,
            latex,
            self.origin()
        );
        Ok(())
    }

    pub fn to_contain(self, words: &[&str], settings: &Settings) -> Result<(), MathwordsError> {
        let speech = verbalize_with_settings(&self.expr, settings)?;
        for word in words {
            assert!(
                speech.contains(word),
                "speech of {:?} is {speech:?}, missing {word:?} ({})",
                self.expr,
                self.origin()
            );
        }
        Ok(())
    }
}

pub fn expect_impl(expr: &str, file: &'static str, line: u32, code: &'static str) -> TestExpr {
    TestExpr {
        expr: expr.to_owned(),
        file,
        line,
        code,
    }
}

#[macro_export]
macro_rules! expect {
    ($e:expr) => {
        $crate::expect_impl($e, file!(), line!(), stringify!($e))
    };
}

#[cfg(feature = "backtrace")]
fn format_backtrace(error: &MathwordsError) -> String {
    let MathwordsError::Parse(err) = error else {
        return "<no backtrace>".to_owned();
    };
    let Ok(backtrace) = btparse::deserialize(&err.backtrace) else {
        return "<unparseable backtrace>".to_owned();
    };
    let mut traces = Vec::new();
    for frame in backtrace.frames {
        let function = frame.function;
        if function.starts_with("mathwords::types::parse_error::ParseError")
            || function.starts_with("core::ops::function::FnOnce")
        {
            continue;
        }
        if function.starts_with("std::panicking") {
            break;
        }
        let loc = match (frame.file, frame.line) {
            (Some(file), Some(line)) => format!("{file}:{line}"),
            (Some(file), None) => file,
            _ => "<unknown>".to_owned(),
        };
        traces.push(format!("at {function} ({loc})"));
    }
    traces.join("\n")
}

#[cfg(not(feature = "backtrace"))]
fn format_backtrace(_error: &MathwordsError) -> String {
    "<enable the `backtrace` feature>".to_owned()
}

pub fn it<F>(desc: &str, test_fn: F)
where
    F: FnOnce() -> Result<(), MathwordsError> + UnwindSafe,
{
    init_logger();
    match catch_unwind(test_fn) {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            let traces = format_backtrace(&e);
            panic!("Test '{desc}' failed with Result::Err: {e}\nBacktrace:\n{traces}");
        }
        Err(panic_payload) => {
            let msg = if let Some(s) = panic_payload.downcast_ref::<&str>() {
                (*s).to_owned()
            } else if let Some(s) = panic_payload.downcast_ref::<String>() {
                s.clone()
            } else {
                "<non-string panic payload>".to_owned()
            };
            panic!("Test '{desc}' panicked: {msg}");
        }
    }
}

/// Settings helpers
pub fn clearspeak() -> Settings {
    Settings::default()
}

pub fn simplespeak() -> Settings {
    Settings::builder()
        .speech_style("SimpleSpeak".to_owned())
        .build()
}

pub fn mathml(style: &str) -> Settings {
    Settings::builder()
        .speech_style(style.to_owned())
        .input_format(InputFormat::MathMl)
        .build()
}

pub fn display(style: &str) -> Settings {
    Settings::builder()
        .display_mode(true)
        .speech_style(style.to_owned())
        .build()
}

pub fn all_settings() -> Vec<Settings> {
    mathwords::get_speech_styles()
        .into_iter()
        .flat_map(|style| {
            [false, true].map(|display_mode| {
                Settings::builder()
                    .display_mode(display_mode)
                    .speech_style(style.to_owned())
                    .build()
            })
        })
        .collect()
}

#[macro_export]
macro_rules! assert_let {
    ($pat:pat = $expr:expr, $($arg:tt)+) => {
        let $pat = $expr else {
            panic!($($arg)+);
        };
    };
    ($pat:pat = $expr:expr) => {
        let $pat = $expr else {
            panic!(
                "assert_let failed: pattern `{}` did not match {} at {}:{} \n{:#?}",
                stringify!($pat), stringify!($expr),
                file!(), line!(),
                $expr
            );
        };
    };
}
