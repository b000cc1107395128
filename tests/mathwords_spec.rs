mod setup;

use mathwords::parser::parse_node::{NodeType, ParseNode};
use mathwords::types::{LexErrorReason, ParseErrorKind};
use mathwords::{
    DEFAULT_SPEECH_STYLE, MathwordsError, Settings, get_speech_styles, parse_tree, verbalize,
    verbalize_batch,
};
use setup::*;

const ACCEPTED: &[&str] = &[
    "x",
    "x^2 + y^2 = z^2",
    r"\frac{-b \pm \sqrt{b^2 - 4ac}}{2a}",
    r"\sum_{i=1}^{n} i^2",
    r"\int_0^1 x \, dx",
    r"\lim_{x \to 0} \frac{\sin x}{x} = 1",
    r"\{x \mid x > 0\}",
    r"[0, 1)",
    r"\left( \frac{a}{b} \right)^2",
    r"\mathrm{Attention}(Q, K, V) = \mathrm{softmax}\left(\frac{QK^T}{\sqrt{d_k}}\right)V",
    r"\begin{cases} 1 & n = 0 \\ n (n-1)! & \text{otherwise} \end{cases}",
    r"\begin{bmatrix} 1 & 0 \\ 0 & 1 \end{bmatrix}",
    r"\hat{\theta} = \arg\max_\theta L(\theta)",
    r"a_1, a_2, \ldots, a_n",
    "x\u{b2} + a\u{2081}",
    r"\left. \frac{df}{dx} \right|_{x=0}",
    r"\|v\|_2",
    r"\lfloor x \rfloor + \lceil y \rceil",
    r"f'(x) = \lim_{h \to 0} \frac{f(x+h) - f(x)}{h}",
    r"\binom{n}{k} = \frac{n!}{k!(n-k)!}",
];

#[test]
fn a_verbalizer() {
    for settings in all_settings() {
        for expr in ACCEPTED {
            it(&format!("speaks {expr} with {settings:?}"), || {
                let speech = mathwords::verbalize_with_settings(expr, &settings)?;
                assert!(!speech.trim().is_empty(), "empty speech for {expr:?}");
                Ok(())
            });
        }
    }
}

#[test]
fn empty_input() {
    it("rejects blank input", || {
        for blank in ["", "   ", "\t\n", r"\,\quad", "{}"] {
            assert_let!(Err(MathwordsError::EmptyInput) = verbalize(blank, false, DEFAULT_SPEECH_STYLE));
        }
        Ok(())
    });
    it("rejects an empty batch", || {
        let items: Vec<(String, Option<bool>)> = Vec::new();
        assert_let!(Err(MathwordsError::EmptyBatch) = verbalize_batch(&items, DEFAULT_SPEECH_STYLE));
        Ok(())
    });
}

#[test]
fn the_style_registry() {
    it("lists the two built-in styles in order", || {
        let styles = get_speech_styles();
        assert_eq!(styles, ["ClearSpeak", "SimpleSpeak"]);
        assert_eq!(styles, get_speech_styles());
        assert_eq!(styles.first().copied(), Some(DEFAULT_SPEECH_STYLE));
        Ok(())
    });
    it("accepts every listed style", || {
        for style in get_speech_styles() {
            verbalize(r"\frac{a}{b}", false, style)?;
        }
        Ok(())
    });
    it("matches style names ignoring case", || {
        assert_eq!(
            verbalize("x^2", false, "clearspeak")?,
            verbalize("x^2", false, "ClearSpeak")?
        );
        Ok(())
    });
    it("rejects an unknown style", || {
        assert_let!(
            Err(MathwordsError::UnknownStyle { name }) = verbalize("x", false, "Nemeth")
        );
        assert_eq!(name, "Nemeth");
        assert_let!(
            Err(MathwordsError::UnknownStyle { .. }) = verbalize_batch(&[("x", None)], "Nemeth")
        );
        Ok(())
    });
}

#[test]
fn display_mode_sensitivity() {
    for style in get_speech_styles() {
        it(&format!("mentions sum bounds in {style}"), || {
            let inline = verbalize(r"\sum_{i=1}^{n} i", false, style)?;
            let block = verbalize(r"\sum_{i=1}^{n} i", true, style)?;
            for speech in [&inline, &block] {
                assert!(speech.contains('1') && speech.contains('n'), "{speech}");
            }
            assert_ne!(inline, block);
            Ok(())
        });
    }
}

#[test]
fn a_batch() {
    it("returns one result per item in order", || {
        let items = [(r"\frac{a}{b}", Some(true)), (r"\sqrt{2}", None)];
        let batch = verbalize_batch(&items, "SimpleSpeak")?;
        assert_eq!(
            batch,
            [
                verbalize(r"\frac{a}{b}", true, "SimpleSpeak")?,
                verbalize(r"\sqrt{2}", false, "SimpleSpeak")?,
            ]
        );
        Ok(())
    });
    it("stops at the first failing item", || {
        let items = [("x", None), (r"\dmodel", None), ("#", None)];
        assert_let!(Err(MathwordsError::Parse(err)) = verbalize_batch(&items, DEFAULT_SPEECH_STYLE));
        assert_let!(ParseErrorKind::UnknownCommand { .. } = *err.kind);
        Ok(())
    });
}

#[test]
fn unsupported_commands() {
    it("rejects an undefined command with its position", || {
        let expr = r"W^Q \in \mathbb{R}^{\dmodel \times d_k}";
        assert_let!(Err(MathwordsError::Parse(err)) = verbalize(expr, false, DEFAULT_SPEECH_STYLE));
        assert_let!(ParseErrorKind::UnknownCommand { name } = &*err.kind);
        assert_eq!(name, r"\dmodel");
        assert_eq!(err.position, Some(20));
        Ok(())
    });
    it("accepts the expanded spelling", || {
        let expr = r"W^Q \in \mathbb{R}^{d_{\text{model}} \times d_k}";
        expect!(expr).to_contain(&["the real numbers", "model"], &clearspeak())
    });
    it("rejects characters with no meaning in math", || {
        assert_let!(Err(MathwordsError::Lex(err)) = verbalize("x # y", false, DEFAULT_SPEECH_STYLE));
        assert_eq!(err.position, 2);
        assert_let!(LexErrorReason::UnexpectedCharacter { character: '#' } = err.reason);
        Ok(())
    });
}

#[test]
fn malformed_input() {
    let settings = Settings::default();
    for expr in [
        r"\frac{a}{",
        "{a + b",
        "a + b}",
        r"\sqrt",
        r"\left( x",
        r"\begin{pmatrix} a \end{bmatrix}",
        r"\begin{tabular} a \end{tabular}",
        "x^",
        "x^2^3",
    ] {
        it(&format!("rejects {expr}"), || expect!(expr).not_to_parse(&settings));
    }
}

#[test]
fn structural_round_trip() {
    for settings in all_settings() {
        it("keeps fraction operands", || {
            expect!(r"\frac{a}{b}").to_contain(&["a", "b"], &settings)
        });
        it("names square roots", || {
            expect!(r"\sqrt{2}").to_contain(&["root", "2"], &settings)
        });
    }
}

#[test]
fn a_matrix() {
    for style in get_speech_styles() {
        it(&format!("reads a 2x2 matrix row by row in {style}"), || {
            let speech = verbalize(
                r"\begin{pmatrix} a & b \\ c & d \end{pmatrix}",
                true,
                style,
            )?;
            let rows: Vec<&str> = speech.split("; ").collect();
            assert!(rows.len() >= 3, "{speech}");
            assert!(rows.iter().any(|row| row.ends_with("a, b")), "{speech}");
            assert!(rows.iter().any(|row| row.ends_with("c, d")), "{speech}");
            Ok(())
        });
        it(&format!("pads a short row in {style}"), || {
            let speech = verbalize(r"\begin{bmatrix} 1 & 2 & 3 \\ 4 \end{bmatrix}", false, style)?;
            assert!(speech.contains("2 by 3") || speech.contains("two by three"), "{speech}");
            assert!(speech.contains("4, blank, blank"), "{speech}");
            Ok(())
        });
    }
}

#[test]
fn the_clearspeak_style() {
    let settings = clearspeak();
    it("reads powers", || {
        expect!("x^2 + y^2 = z^2").to_speak("x squared plus y squared equals z squared", &settings)
    });
    it("groups compound bases", || {
        expect!("(a+b)^2").to_speak("the quantity a plus b, squared", &settings)
    });
    it("reads common fractions", || {
        expect!(r"\frac{3}{4}").to_speak("3 quarters", &settings)
    });
    it("reads function application", || {
        expect!("f(x) = x^2").to_speak("f of x equals x squared", &settings)
    });
    it("reads binomials", || expect!(r"\binom{n}{k}").to_speak("n choose k", &settings));
    it("reads factorials", || expect!("n!").to_speak("n factorial", &settings));
    it("reads set builder notation", || {
        expect!(r"\{x \mid x > 0\}")
            .to_speak("the set of all x such that x is greater than 0", &settings)
    });
    it("reads limits", || {
        expect!(r"\lim_{x \to 0} \frac{\sin x}{x}").to_contain(
            &["limit as x approaches 0", "sine of x"],
            &settings,
        )
    });
    it("reads named functions", || {
        expect!(r"\mathrm{Attention}(Q, K, V)").to_speak("Attention of Q, K, V", &settings)
    });
    it("reads transposes", || {
        expect!("QK^T").to_speak("Q K transpose", &settings)
    });
    it("reads a piecewise definition", || {
        expect!(r"\begin{cases} x & x \ge 0 \\ -x & \text{otherwise} \end{cases}").to_speak(
            "two cases; case one, x, if x is greater than or equal to 0; \
             case two, negative x, otherwise",
            &settings,
        )
    });
}

#[test]
fn the_simplespeak_style() {
    let settings = simplespeak();
    it("does not use common fraction words", || {
        expect!(r"\frac{3}{4}").to_speak("3 over 4", &settings)
    });
    it("brackets compound fractions", || {
        expect!(r"\frac{x+1}{2}").to_speak("fraction, x plus 1 over 2, end fraction", &settings)
    });
    it("speaks delimiters", || {
        expect!("2(a+b)").to_speak("2 open paren a plus b close paren", &settings)
    });
    it("reads bounds as a range", || {
        expect!(r"\sum_{i=1}^{n} i").to_speak("sum over i from 1 to n of i", &settings)
    });
    it("reads powers without ordinals", || {
        expect!("x^n").to_speak("x to the power of n", &settings)
    });
}

#[test]
fn display_mode() {
    it("adds an article to big operators", || {
        expect!(r"\sum_{i=1}^{n} i").to_speak(
            "the sum from i equals 1 to n of i",
            &display("ClearSpeak"),
        )
    });
    it("closes matrices", || {
        expect!(r"\begin{matrix} 1 \end{matrix}").to_contain(&["end matrix"], &display("ClearSpeak"))
    });
    it("spells out simple fractions", || {
        expect!(r"\frac{a}{b}").to_speak(
            "the fraction with numerator a and denominator b",
            &display("ClearSpeak"),
        )
    });
}

#[test]
fn equivalent_spellings() {
    let settings = clearspeak();
    for (expr, other) in [
        (r"\alpha", "\u{3b1}"),
        (r"x \le y", "x \u{2264} y"),
        ("x\u{b2}", "x^2"),
        ("a\u{2081}", "a_1"),
        (r"\lvert x \rvert", "|x|"),
        (r"\left( x \right)", "(x)"),
        (r"\bigl[ x \bigr]", "[x]"),
        (r"\dfrac{a}{b}", r"\frac{a}{b}"),
        (r"{a \over b}", r"\frac{a}{b}"),
        (r"a\,b", "a b"),
        (r"\sum\limits_{i} i", r"\sum_{i} i"),
    ] {
        it(&format!("{expr} reads like {other}"), || {
            expect!(expr).to_speak_like(other, &settings)
        });
    }
}

#[test]
fn a_parse_tree() {
    let settings = Settings::default();
    it("nests by precedence", || {
        let tree = parse_tree("a + b c^2", &settings)?;
        assert_let!(ParseNode::BinaryOp(sum) = tree);
        assert_let!(Some((_, plus, right)) = sum.single());
        assert_eq!(plus.text, "+");
        assert_eq!(right.node_type(), NodeType::Sequence);
        Ok(())
    });
    it("keeps a run of one operator flat", || {
        let tree = parse_tree("a - b + c - d", &settings)?;
        assert_let!(ParseNode::BinaryOp(chain) = tree);
        assert_eq!(chain.rest.len(), 3);
        assert!(chain.operands().all(ParseNode::is_leaf));
        Ok(())
    });
    it("parses equivalent inputs alike", || {
        expect!(r"x^{2}").to_parse_like("x^2", &settings)
    });
    it("parses deep but bounded nesting", || {
        let nested = format!("{}x{}", "{".repeat(50), "}".repeat(50));
        expect!(&nested).to_parse(&settings)
    });
    it("rejects nesting beyond the limit", || {
        let shallow = Settings::builder().max_nesting(8).build();
        let nested = format!("{}x{}", "{".repeat(50), "}".repeat(50));
        expect!(&nested).not_to_parse(&shallow)
    });
}

#[test]
fn a_long_expression() {
    let settings = clearspeak();
    it("reads a sum of ten thousand terms", || {
        let sum = format!("{}a", "a+".repeat(10_000));
        let speech = verbalize(&sum, false, "ClearSpeak")?;
        assert_eq!(speech.matches(" plus ").count(), 10_000);
        Ok(())
    });
    it("reads a long list of relations and products", || {
        let chain = format!("{}x", r"x \cdot y = ".repeat(5_000));
        expect!(&chain).to_contain(&["x times y equals x times y"], &settings)
    });
    it("reads a set with many members", || {
        let members = vec!["n"; 12_000].join(", ");
        expect!(&format!(r"\{{{members}\}}")).to_contain(&["the set n, n, n"], &settings)
    });
}

#[test]
fn a_middle_delimiter() {
    let settings = clearspeak();
    it("divides a conditional probability", || {
        expect!(r"P\left( A \middle| B \right)").to_contain(&["A given B"], &settings)
    });
    it("divides a set", || {
        expect!(r"\left\{ x \middle| x > 0 \right\}")
            .to_speak("the set of all x such that x is greater than 0", &settings)
    });
    it("needs a surrounding pair", || {
        expect!(r"x \middle| y").not_to_parse(&settings)
    });
}

#[test]
fn open_ended_phrases() {
    let settings = clearspeak();
    it("closes a fraction before its exponent", || {
        expect!(r"\frac{a}{b}^2")
            .to_speak("the fraction with numerator a and denominator b, squared", &settings)
    });
    it("closes a fraction before a factor", || {
        expect!(r"\frac{a}{b}c")
            .to_speak("the fraction with numerator a and denominator b, c", &settings)
    });
    it("closes a root before a factor", || {
        expect!(r"\sqrt{x}y").to_speak("the square root of x, end root, y", &settings)
    });
    it("brackets a fraction before its exponent in SimpleSpeak", || {
        expect!(r"\frac{a}{b}^2")
            .to_speak("fraction, a over b, end fraction, squared", &simplespeak())
    });
    it("keeps the short reading at the end", || {
        expect!(r"y \sqrt{x}").to_speak("y the square root of x", &settings)
    });
}

#[test]
fn mathml_input() {
    for style in get_speech_styles() {
        let settings = mathml(style);
        it(&format!("reads the quadratic formula in {style}"), || {
            expect!(
                "<math><mi>x</mi><mo>=</mo><mfrac><mrow><mo>\u{2212}</mo><mi>b</mi><mo>\u{b1}</mo>\
                 <msqrt><msup><mi>b</mi><mn>2</mn></msup><mo>\u{2212}</mo><mn>4</mn><mi>a</mi><mi>c</mi></msqrt>\
                 </mrow><mrow><mn>2</mn><mi>a</mi></mrow></mfrac></math>"
            )
            .to_speak_like_latex(r"x = \frac{-b \pm \sqrt{b^2 - 4ac}}{2a}", &settings)
        });
        it(&format!("reads a fenced table as a matrix in {style}"), || {
            expect!(
                "<math><mrow><mo>(</mo><mtable>\
                 <mtr><mtd><mn>1</mn></mtd><mtd><mn>0</mn></mtd></mtr>\
                 <mtr><mtd><mn>0</mn></mtd><mtd><mn>1</mn></mtd></mtr>\
                 </mtable><mo>)</mo></mrow></math>"
            )
            .to_speak_like_latex(r"\begin{pmatrix} 1 & 0 \\ 0 & 1 \end{pmatrix}", &settings)
        });
        it(&format!("reads a limit in {style}"), || {
            expect!(
                "<math><munder><mo>lim</mo><mrow><mi>x</mi><mo>\u{2192}</mo><mn>0</mn></mrow></munder>\
                 <mfrac><mrow><mi>sin</mi><mo>&#x2061;</mo><mi>x</mi></mrow><mi>x</mi></mfrac></math>"
            )
            .to_speak_like_latex(r"\lim_{x \to 0} \frac{\sin x}{x}", &settings)
        });
    }

    let settings = mathml(DEFAULT_SPEECH_STYLE);
    it("reads a fraction", || {
        expect!("<math><mfrac><mn>1</mn><mn>2</mn></mfrac></math>").to_speak("1 half", &settings)
    });
    it("reads a double-struck letter as a number set", || {
        expect!(r#"<math><mi>x</mi><mo>&#x2208;</mo><mi mathvariant="double-struck">R</mi></math>"#)
            .to_contain(&["the real numbers"], &settings)
    });
    it("reads cases", || {
        expect!(
            "<math><mi>f</mi><mo>=</mo><mrow><mo>{</mo><mtable>\
             <mtr><mtd><mn>1</mn></mtd><mtd><mi>x</mi><mo>&gt;</mo><mn>0</mn></mtd></mtr>\
             <mtr><mtd><mn>0</mn></mtd><mtd><mtext>otherwise</mtext></mtd></mtr>\
             </mtable></mrow></math>"
        )
        .to_speak_like_latex(
            r"f = \begin{cases} 1 & x > 0 \\ 0 & \text{otherwise} \end{cases}",
            &settings,
        )
    });
    it("goes through the public entry point", || {
        let speech = mathwords::verbalize_mathml(
            "<math><msqrt><mi>x</mi></msqrt><mi>y</mi></math>",
            false,
            DEFAULT_SPEECH_STYLE,
        )?;
        assert_eq!(speech, "the square root of x, end root, y");
        Ok(())
    });
    it("reports unsupported markup with its offset", || {
        let err = mathwords::verbalize_mathml(
            "<math><mi>x</mi><mmultiscripts><mi>y</mi></mmultiscripts></math>",
            false,
            DEFAULT_SPEECH_STYLE,
        )
        .unwrap_err();
        assert_let!(MathwordsError::Mathml(inner) = &err);
        assert!(inner.to_string().contains("mmultiscripts"));
        assert_eq!(err.position(), Some(16));
        Ok(())
    });
    it("rejects a document that is not math", || {
        expect!("<mrow><mi>x</mi></mrow>").not_to_parse(&settings)
    });
    it("rejects malformed XML", || {
        expect!("<math><mi>x</math>").not_to_parse(&settings)
    });
}
