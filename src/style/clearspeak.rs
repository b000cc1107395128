//! ClearSpeak: full phrasing with spelled-out counts and "is" relations

use phf::phf_map;

use super::{BoundsPhrasing, FractionPhrasing, NumberForm, SpeechStyle};

/// The ClearSpeak style.
pub static CLEARSPEAK: SpeechStyle = SpeechStyle {
    name: "ClearSpeak",
    fraction: FractionPhrasing::Verbose,
    common_fractions: true,
    ordinal_powers: true,
    bounds: BoundsPhrasing::FromTo,
    numbers: NumberForm::Words,
    speak_delimiters: false,
    function_article: true,
    quantity: "the quantity",
    negative: "negative",
    end_exponent: "end exponent",
    end_root: "end root",
    end_subscript: "end subscript",
    words: phf_map! {
        "<" => "is less than",
        ">" => "is greater than",
        "\\lt" => "is less than",
        "\\gt" => "is greater than",
        "\\le" => "is less than or equal to",
        "\\leq" => "is less than or equal to",
        "\u{2264}" => "is less than or equal to",
        "\\ge" => "is greater than or equal to",
        "\\geq" => "is greater than or equal to",
        "\u{2265}" => "is greater than or equal to",
        "\\ne" => "is not equal to",
        "\\neq" => "is not equal to",
        "\u{2260}" => "is not equal to",
        "\\cdot" => "times",
        "\u{22c5}" => "times",
        "\u{b7}" => "times",
        "/" => "divided by",
    },
};
