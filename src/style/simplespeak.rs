//! SimpleSpeak: terse phrasing that names delimiters and brackets compound
//! fractions

use phf::phf_map;

use super::{BoundsPhrasing, FractionPhrasing, NumberForm, SpeechStyle};

/// The SimpleSpeak style.
pub static SIMPLESPEAK: SpeechStyle = SpeechStyle {
    name: "SimpleSpeak",
    fraction: FractionPhrasing::Bracketed,
    common_fractions: false,
    ordinal_powers: false,
    bounds: BoundsPhrasing::RangingOver,
    numbers: NumberForm::Numerals,
    speak_delimiters: true,
    function_article: false,
    quantity: "the quantity",
    negative: "negative",
    end_exponent: "end exponent",
    end_root: "end root",
    end_subscript: "end sub",
    words: phf_map! {
        "\\ne" => "not equal to",
        "\\neq" => "not equal to",
        "\u{2260}" => "not equal to",
    },
};
