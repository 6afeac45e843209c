use bfont::{DecodeMode, FontSet, SPACE};
use proc_macro::TokenStream;
use proc_macro2::Span;
use proc_macro_crate::{crate_name, FoundCrate};
use quote::quote;
use std::{fs, path::PathBuf};
use syn::{
    parse::{Parse, ParseStream},
    parse_macro_input,
    punctuated::Punctuated,
    Ident, LitChar, LitStr, Result, Token,
};

struct IncludeBfont {
    filename: LitStr,
    character_ranges: Option<CharacterRanges>,
}

impl IncludeBfont {
    fn contains(&self, c: char) -> bool {
        self.character_ranges
            .as_ref()
            .map_or(true, |ranges| ranges.contains(c))
    }
}

impl Parse for IncludeBfont {
    fn parse(input: ParseStream) -> Result<Self> {
        let filename = input.parse()?;

        let character_ranges = if input.peek(Token![,]) {
            input.parse::<Token![,]>()?;
            Some(input.parse()?)
        } else {
            None
        };

        Ok(Self {
            filename,
            character_ranges,
        })
    }
}

/// `'a'..='z' | '0'..='9' | ' '`
struct CharacterRanges {
    ranges: Punctuated<CharacterRange, Token![|]>,
}

impl CharacterRanges {
    fn contains(&self, c: char) -> bool {
        self.ranges.iter().any(|range| range.contains(c))
    }
}

impl Parse for CharacterRanges {
    fn parse(input: ParseStream) -> Result<Self> {
        Ok(Self {
            ranges: Punctuated::parse_separated_nonempty(input)?,
        })
    }
}

struct CharacterRange {
    from: char,
    to: char,
}

impl CharacterRange {
    fn contains(&self, c: char) -> bool {
        (self.from..=self.to).contains(&c)
    }
}

impl Parse for CharacterRange {
    fn parse(input: ParseStream) -> Result<Self> {
        let from = input.parse::<LitChar>()?.value();
        let to = if input.peek(Token![..=]) {
            input.parse::<Token![..=]>()?;
            input.parse::<LitChar>()?.value()
        } else {
            from
        };

        Ok(Self { from, to })
    }
}

/// Path to `eg-bfont` as seen from the invoking crate, which may have
/// renamed the dependency.
fn eg_bfont_path() -> proc_macro2::TokenStream {
    match crate_name("eg-bfont") {
        Ok(FoundCrate::Name(name)) => {
            let ident = Ident::new(&name, Span::call_site());
            quote!(::#ident)
        }
        _ => quote!(::eg_bfont),
    }
}

fn read_font(filename: &LitStr) -> Result<FontSet> {
    let manifest_dir = std::env::var_os("CARGO_MANIFEST_DIR")
        .ok_or_else(|| syn::Error::new(filename.span(), "CARGO_MANIFEST_DIR is not set"))?;
    let mut path = PathBuf::from(manifest_dir);
    path.push(filename.value());

    let bytes = fs::read(&path).map_err(|err| {
        syn::Error::new(
            filename.span(),
            format!("failed to read {}: {err}", path.display()),
        )
    })?;

    bfont::decode_with(&bytes, DecodeMode::Lenient).map_err(|err| {
        syn::Error::new(
            filename.span(),
            format!("failed to decode {}: {err}", path.display()),
        )
    })
}

#[proc_macro]
pub fn include_bfont(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as IncludeBfont);

    let font = match read_font(&input.filename) {
        Ok(font) => font,
        Err(err) => return err.to_compile_error().into(),
    };

    let krate = eg_bfont_path();
    let height = u32::from(font.height());
    let font_size = u32::from(font.font_size());

    let mut data = Vec::new();
    let mut entries = Vec::with_capacity(font.glyphs().len());
    for (code_point, glyph) in font.glyphs().iter().enumerate() {
        if !input.contains(char::from(code_point as u8)) {
            entries.push(None);
            continue;
        }

        entries.push(Some((u32::from(glyph.width()), data.len())));
        data.extend(glyph.pixels().iter().map(|p| *p != 0));
    }

    let replacement = usize::from(SPACE);
    let (space_width, space_start) = entries[replacement].unwrap_or((0, 0));
    let glyphs = entries.iter().map(|entry| {
        let (width, start_index) = entry.unwrap_or((space_width, space_start));
        quote! {
            #krate::BfontGlyph {
                width: #width,
                start_index: #start_index,
            }
        }
    });

    let data = bits_to_bytes(&data);

    let output = quote! {
        #krate::BfontFont {
            height: #height,
            font_size: #font_size,
            replacement_character: #replacement,
            glyphs: &[ #( #glyphs ),* ],
            data: &[ #( #data ),* ],
        }
    };

    output.into()
}

/// Packs pixels eight to a byte, most significant bit first.
fn bits_to_bytes(bits: &[bool]) -> Vec<u8> {
    bits.chunks(8)
        .map(|bits| {
            bits.iter()
                .enumerate()
                .filter(|(_, b)| **b)
                .map(|(i, _)| 0x80 >> i)
                .sum()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bits_to_bytes() {
        let f = false;
        let t = true;

        assert_eq!(bits_to_bytes(&[f, f, f, f, f, f, f, f]), vec![0x00]);
        assert_eq!(bits_to_bytes(&[t, f, f, f, f, f, f, f]), vec![0x80]);
        assert_eq!(bits_to_bytes(&[t, f, t, f, f, f, f, t]), vec![0xa1]);
        assert_eq!(
            bits_to_bytes(&[f, f, f, f, f, f, f, f, t, t]),
            vec![0x00, 0xc0]
        );
    }

    #[test]
    fn test_parses_character_ranges() {
        let input: IncludeBfont = syn::parse_str(r#""font.bfont", 'a'..='c' | ' '"#).unwrap();

        assert_eq!("font.bfont", input.filename.value());
        assert!(input.contains('b'));
        assert!(input.contains(' '));
        assert!(!input.contains('d'));
    }

    #[test]
    fn test_includes_everything_without_ranges() {
        let input: IncludeBfont = syn::parse_str(r#""font.bfont""#).unwrap();

        assert!(input.contains('\0'));
        assert!(input.contains('~'));
    }
}
