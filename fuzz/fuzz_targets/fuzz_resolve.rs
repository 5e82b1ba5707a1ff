#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use mixscript_style::{
    FontWeight, ResolutionCache, Rgba, ScriptOverrides, ScriptRegistry, ScriptStyle,
    StyleProperties, resolve,
};
use mixscript_text::ScriptTag;

#[derive(Debug, Arbitrary)]
struct Props {
    font_size: Option<f32>,
    color: Option<u32>,
    weight: Option<u16>,
    height: Option<f32>,
    locale: Option<String>,
    fallback: Option<Vec<String>>,
    inherit: Option<bool>,
}

impl Props {
    fn build(self) -> StyleProperties {
        StyleProperties {
            font_size: self.font_size,
            color: self.color.map(Rgba),
            font_weight: self.weight.map(FontWeight),
            height: self.height,
            locale: self.locale,
            font_family_fallback: self.fallback,
            inherit: self.inherit,
            ..StyleProperties::default()
        }
    }
}

#[derive(Debug, Arbitrary)]
struct Input {
    base: Props,
    layers: Vec<(u8, Option<String>, Props)>,
    lookups: Vec<u8>,
}

fn tag(n: u8) -> ScriptTag {
    ScriptTag::ALL[n as usize % ScriptTag::ALL.len()]
}

fuzz_target!(|input: Input| {
    if input.layers.len() > 16 || input.lookups.len() > 64 {
        return;
    }

    let base = input.base.build();
    let overrides: ScriptOverrides = input
        .layers
        .into_iter()
        .map(|(n, family, props)| {
            let mut style = ScriptStyle::from(props.build());
            style.font_family = family;
            (tag(n), style)
        })
        .collect();

    let mut cache = ResolutionCache::new(ScriptRegistry::builtin(), 4);
    for n in input.lookups {
        let t = tag(n);
        let direct = resolve(t, &base, &overrides);
        assert!(!direct.font_family.is_empty() || overrides.get(t).is_some());
        assert!(!direct.font_family_fallback.is_empty() || overrides.get(t).is_some());

        let cached = cache.resolve(t, &base, &overrides);

        // NaN fields make a style unequal to itself.
        #[allow(clippy::eq_op)]
        let comparable = direct == direct;
        if comparable {
            assert_eq!(cached, direct);
            assert_eq!(resolve(t, &base, &overrides), direct);
            if t == ScriptTag::Neutral {
                assert_eq!(direct, resolve(ScriptTag::Latin, &base, &overrides));
            }
        }
    }
});
