use std::fmt::{Display, Write};

/// Escapes text for use in element content and quoted attribute values
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    push_escaped(&mut out, input);
    out
}

fn push_escaped(out: &mut String, input: &str) {
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
}

/// Values whose `Display` output can never contain markup
pub trait Trusted: Display + private::Sealed {}

mod private {
    pub trait Sealed {}
}

macro_rules! trusted_numbers {
    ($($ty:ty),*) => {
        $(
            impl private::Sealed for $ty {}
            impl Trusted for $ty {}
        )*
    };
}

trusted_numbers!(u8, u16, u32, u64, usize, i32, i64);

/// Whole-number percentage in 0..=100
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Percent(u8);

impl Percent {
    /// Converts a similarity in [0, 1], rounding to the nearest percent.
    /// Out-of-range inputs are clamped and NaN maps to 0.
    pub fn from_similarity(similarity: f64) -> Self {
        if similarity.is_nan() {
            return Percent(0);
        }
        Percent((similarity * 100.0).round().clamp(0.0, 100.0) as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Display for Percent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl private::Sealed for Percent {}
impl Trusted for Percent {}

/// An HTML fragment under construction.
///
/// Template text must be a `&'static str` literal; anything computed at runtime
/// goes through [`Markup::text`] (escaped) or [`Markup::value`] (numbers and other
/// [`Trusted`] values). There is no way to append an unescaped runtime string.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Markup(String);

impl Markup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends template text verbatim
    pub fn raw(&mut self, fragment: &'static str) -> &mut Self {
        self.0.push_str(fragment);
        self
    }

    /// Appends runtime text, escaped
    pub fn text(&mut self, value: &str) -> &mut Self {
        push_escaped(&mut self.0, value);
        self
    }

    /// Appends a constrained value
    pub fn value<T: Trusted>(&mut self, value: T) -> &mut Self {
        // Writing into a String cannot fail
        let _ = write!(self.0, "{}", value);
        self
    }

    /// Appends a rendered component
    pub fn child<R: Render + ?Sized>(&mut self, component: &R) -> &mut Self {
        component.render_into(self);
        self
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Markup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Something that knows how to write itself as HTML
pub trait Render {
    fn render_into(&self, out: &mut Markup);

    fn render(&self) -> Markup {
        let mut out = Markup::new();
        self.render_into(&mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html_special_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_escape_leaves_plain_text_alone() {
        assert_eq!(escape_html("Amélie (2001)"), "Amélie (2001)");
    }

    #[test]
    fn test_percent_rounds_to_nearest() {
        assert_eq!(Percent::from_similarity(0.873).to_string(), "87%");
        assert_eq!(Percent::from_similarity(0.875).get(), 88);
        assert_eq!(Percent::from_similarity(0.004).get(), 0);
    }

    #[test]
    fn test_percent_clamps() {
        assert_eq!(Percent::from_similarity(1.2).get(), 100);
        assert_eq!(Percent::from_similarity(-0.3).get(), 0);
        assert_eq!(Percent::from_similarity(f64::NAN).get(), 0);
    }

    #[test]
    fn test_builder_mixes_template_and_escaped_text() {
        let mut out = Markup::new();
        out.raw("<b>").text("<i>").raw("</b> ").value(42u32);
        assert_eq!(out.as_str(), "<b>&lt;i&gt;</b> 42");
    }
}
