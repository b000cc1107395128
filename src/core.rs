//! Core functionality: main entry points and input validation

use log::{debug, trace};

use crate::build_speech::build_speech;
use crate::namespace::KeyMap;
use crate::parse_tree::parse_tree;
use crate::style::{get_style, style_names};
use crate::types::{InputFormat, MathwordsError, Settings};

/// Converts one LaTeX expression to English speech.
///
/// Thin wrapper over [`verbalize_with_settings`] for the common case.
pub fn verbalize(
    expression: &str,
    display_mode: bool,
    speech_style: &str,
) -> Result<String, MathwordsError> {
    let settings = Settings::builder()
        .display_mode(display_mode)
        .speech_style(speech_style.to_owned())
        .build();
    verbalize_with_settings(expression, &settings)
}

/// Converts one presentation MathML `<math>` element to English speech.
///
/// The markup is read into the same expression tree as the equivalent
/// LaTeX, so both inputs are spoken identically.
pub fn verbalize_mathml(
    mathml: &str,
    display_mode: bool,
    speech_style: &str,
) -> Result<String, MathwordsError> {
    let settings = Settings::builder()
        .display_mode(display_mode)
        .speech_style(speech_style.to_owned())
        .input_format(InputFormat::MathMl)
        .build();
    verbalize_with_settings(mathml, &settings)
}

/// Converts one expression to English speech using `settings`.
pub fn verbalize_with_settings(
    expression: &str,
    settings: &Settings,
) -> Result<String, MathwordsError> {
    if expression.trim().is_empty() {
        return Err(MathwordsError::EmptyInput);
    }
    let style = get_style(&settings.speech_style).ok_or_else(|| MathwordsError::UnknownStyle {
        name: settings.speech_style.clone(),
    })?;

    debug!(
        "verbalizing {} with style={} display_mode={} len={}",
        settings.input_format,
        style.name,
        settings.display_mode,
        expression.len()
    );
    let tree = parse_tree(expression, settings).inspect_err(|err| {
        debug!("failed to verbalize {expression:?}: {err}");
    })?;
    trace!("parsed tree: {tree:?}");

    Ok(build_speech(&tree, style, settings.display_mode))
}

/// Converts a list of expressions in order, all with `speech_style`.
///
/// Each item carries its own display flag; `None` means inline. The first
/// failing item aborts the call with that item's error. Repeated
/// `(expression, display_mode)` pairs within one call are verbalized once.
pub fn verbalize_batch<S: AsRef<str>>(
    items: &[(S, Option<bool>)],
    speech_style: &str,
) -> Result<Vec<String>, MathwordsError> {
    if items.is_empty() {
        return Err(MathwordsError::EmptyBatch);
    }
    if get_style(speech_style).is_none() {
        return Err(MathwordsError::UnknownStyle {
            name: speech_style.to_owned(),
        });
    }

    let mut seen: KeyMap<(&str, bool), String> = KeyMap::default();
    let mut results = Vec::with_capacity(items.len());
    for (index, (expression, display_mode)) in items.iter().enumerate() {
        let expression = expression.as_ref();
        let display_mode = display_mode.unwrap_or(false);
        if let Some(speech) = seen.get(&(expression, display_mode)) {
            debug!("batch item {index} served from cache");
            results.push(speech.clone());
            continue;
        }
        let speech = verbalize(expression, display_mode, speech_style)?;
        seen.insert((expression, display_mode), speech.clone());
        results.push(speech);
    }
    Ok(results)
}

/// Names of the registered speech styles, default first.
#[must_use]
pub fn get_speech_styles() -> Vec<&'static str> {
    style_names()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_SPEECH_STYLE;

    #[test]
    fn test_validation_errors() {
        assert!(matches!(
            verbalize("  ", false, DEFAULT_SPEECH_STYLE),
            Err(MathwordsError::EmptyInput)
        ));
        assert!(matches!(
            verbalize("x", false, "Nemeth"),
            Err(MathwordsError::UnknownStyle { name }) if name == "Nemeth"
        ));
        let empty: [(&str, Option<bool>); 0] = [];
        assert!(matches!(
            verbalize_batch(&empty, DEFAULT_SPEECH_STYLE),
            Err(MathwordsError::EmptyBatch)
        ));
    }

    #[test]
    fn test_batch_matches_single_calls() {
        let items = [("x^2", None), (r"\frac{a}{b}", Some(true)), ("x^2", None)];
        let batch = verbalize_batch(&items, "SimpleSpeak").unwrap();
        assert_eq!(batch.len(), 3);
        assert_eq!(batch[0], verbalize("x^2", false, "SimpleSpeak").unwrap());
        assert_eq!(batch[1], verbalize(r"\frac{a}{b}", true, "SimpleSpeak").unwrap());
        assert_eq!(batch[0], batch[2]);
    }

    #[test]
    fn test_batch_fails_fast() {
        let items = [("x", None), (r"\frac{a}{", None), (r"\dmodel", None)];
        let err = verbalize_batch(&items, DEFAULT_SPEECH_STYLE).unwrap_err();
        assert!(matches!(err, MathwordsError::Parse(_)));
        assert_eq!(err.position(), Some(8));
    }

    #[test]
    fn test_mathml_reads_like_latex() {
        let mathml = "<math xmlns=\"http://www.w3.org/1998/Math/MathML\"><mfrac><mi>a</mi><mi>b</mi></mfrac></math>";
        for style in get_speech_styles() {
            assert_eq!(
                verbalize_mathml(mathml, false, style).unwrap(),
                verbalize(r"\frac{a}{b}", false, style).unwrap()
            );
        }
        let err = verbalize_mathml("<math><mfrac><mi>a</mi></mfrac></math>", false, DEFAULT_SPEECH_STYLE)
            .unwrap_err();
        assert!(matches!(err, MathwordsError::Mathml(_)));
        assert_eq!(err.position(), Some(6));
        assert!(!err.is_validation_error());
    }

    #[test]
    fn test_every_listed_style_works() {
        for style in get_speech_styles() {
            assert!(verbalize(r"\sqrt{x}", false, style).is_ok());
        }
    }
}
