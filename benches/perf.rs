use std::collections::HashMap;
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use mathwords::{DEFAULT_SPEECH_STYLE, InputFormat, Settings, verbalize_with_settings};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTestCase {
    Simple(String),
    Detailed(DetailedCase),
}

#[derive(Debug, Deserialize)]
struct DetailedCase {
    tex: String,
    #[serde(default)]
    display: Option<DisplayValue>,
    #[serde(default)]
    style: Option<String>,
    #[serde(default)]
    mathml: bool,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DisplayValue {
    Bool(bool),
    Int(i64),
}

impl From<DisplayValue> for bool {
    fn from(value: DisplayValue) -> Self {
        match value {
            DisplayValue::Bool(value) => value,
            DisplayValue::Int(value) => value != 0,
        }
    }
}

impl RawTestCase {
    fn into_settings(self) -> (String, Settings) {
        match self {
            RawTestCase::Simple(tex) => (tex, Settings::default()),
            RawTestCase::Detailed(case) => {
                let settings = Settings::builder()
                    .display_mode(case.display.is_some_and(Into::into))
                    .speech_style(
                        case.style
                            .unwrap_or_else(|| DEFAULT_SPEECH_STYLE.to_owned()),
                    )
                    .input_format(if case.mathml {
                        InputFormat::MathMl
                    } else {
                        InputFormat::Latex
                    })
                    .build();
                (case.tex, settings)
            }
        }
    }
}

struct PreparedCase {
    name: String,
    tex: Arc<str>,
    settings: Arc<Settings>,
}

fn load_cases() -> Result<Vec<PreparedCase>, Box<dyn Error>> {
    let file = File::open(dataset_path())?;
    let raw_cases: HashMap<String, RawTestCase> = serde_yaml::from_reader(BufReader::new(file))?;

    let mut cases: Vec<PreparedCase> = raw_cases
        .into_iter()
        .map(|(name, raw)| {
            let (tex, settings) = raw.into_settings();
            PreparedCase {
                name,
                tex: Arc::from(tex),
                settings: Arc::new(settings),
            }
        })
        .collect();
    cases.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(cases)
}

fn dataset_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("benches/data/cases.yaml")
}

fn bench_verbalize(c: &mut Criterion) {
    let cases = load_cases().expect("failed to load benchmark cases");

    let mut group = c.benchmark_group("verbalize");
    for PreparedCase {
        name,
        tex,
        settings,
    } in cases
    {
        // Every case must succeed before it is worth timing.
        verbalize_with_settings(&tex, &settings)
            .unwrap_or_else(|err| panic!("case {name} failed: {err}"));

        group.bench_function(&name, move |b| {
            let tex = Arc::clone(&tex);
            let settings = Arc::clone(&settings);

            b.iter(|| {
                let speech = verbalize_with_settings(tex.as_ref(), settings.as_ref())
                    .expect("verbalizing failed during benchmark");
                black_box(speech.len());
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_verbalize);
criterion_main!(benches);
