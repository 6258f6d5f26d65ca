//! Table cell model
//!
//! A [`Cell`] is everything the extractors read from one `th`/`td`: its
//! rendered text, the first link and the first image. Absent links and images
//! are `None`, never errors.

use crate::page::document::{non_empty_attr, rendered_text, resolve_against};
use scraper::ElementRef;
use url::Url;

/// An `<img>` inside a cell
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Image {
    /// Absolute image source
    pub src: String,
    /// `alt` attribute
    pub alt: Option<String>,
    /// `title` attribute
    pub title: Option<String>,
}

impl Image {
    /// Header label: `alt`, falling back to `title`
    pub fn label(&self) -> Option<&str> {
        self.alt.as_deref().or(self.title.as_deref())
    }

    /// Body-row label: `title`, falling back to `alt`.
    ///
    /// Body images carry the file name in `alt` (`"Fishing icon.png"`) and
    /// the item name in `title`.
    pub fn caption(&self) -> Option<&str> {
        self.title.as_deref().or(self.alt.as_deref())
    }

    fn from_element(element: ElementRef<'_>, base: &Url) -> Self {
        Self {
            src: element
                .value()
                .attr("src")
                .map(|src| resolve_against(base, src))
                .unwrap_or_default(),
            alt: non_empty_attr(element, "alt"),
            title: non_empty_attr(element, "title"),
        }
    }
}

/// The first `<a>` inside a cell
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Link {
    /// Absolute link target
    pub href: String,
    /// `title` attribute
    pub title: Option<String>,
    /// First image nested under the link
    pub image: Option<Image>,
}

/// Whether a cell came from a `th` or a `td`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    /// `th`
    Header,
    /// `td`
    Data,
}

/// Extractable content of one table cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// Header or data cell
    pub kind: CellKind,
    /// Rendered text, whitespace collapsed and trimmed
    pub text: String,
    /// First link in the cell
    pub link: Option<Link>,
    /// First image anywhere in the cell
    pub image: Option<Image>,
}

impl Cell {
    /// A data cell with only text, mostly useful for building tables by hand
    pub fn data<S: Into<String>>(text: S) -> Self {
        Self {
            kind: CellKind::Data,
            text: text.into(),
            link: None,
            image: None,
        }
    }

    /// A header cell with only text
    pub fn header<S: Into<String>>(text: S) -> Self {
        Self {
            kind: CellKind::Header,
            ..Self::data(text)
        }
    }

    /// Attach a link
    pub fn with_link(mut self, link: Link) -> Self {
        self.link = Some(link);
        self
    }

    /// Attach an image
    pub fn with_image(mut self, image: Image) -> Self {
        self.image = Some(image);
        self
    }

    /// Read a `th` or `td` element. Returns `None` for any other element.
    pub fn from_element(element: ElementRef<'_>, base: &Url) -> Option<Self> {
        let kind = match element.value().name() {
            "th" => CellKind::Header,
            "td" => CellKind::Data,
            _ => return None,
        };

        let link = first_descendant(element, "a").map(|a| Link {
            href: a
                .value()
                .attr("href")
                .map(|href| resolve_against(base, href))
                .unwrap_or_default(),
            title: non_empty_attr(a, "title"),
            image: first_descendant(a, "img").map(|img| Image::from_element(img, base)),
        });

        let image = first_descendant(element, "img").map(|img| Image::from_element(img, base));

        Some(Self {
            kind,
            text: rendered_text(element),
            link,
            image,
        })
    }
}

/// A link's label, image and target, read together
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkedItem {
    /// Label from the link title, or the linked image label
    pub label: String,
    /// Image source, empty without an image
    pub image_ref: String,
    /// Link target
    pub link: String,
}

/// Read access to cell content shared by all row extractors
pub trait CellContent {
    /// Rendered text
    fn text(&self) -> &str;

    /// First link
    fn link(&self) -> Option<&Link>;

    /// First image anywhere
    fn image(&self) -> Option<&Image>;

    /// Image under the link when there is a link, otherwise any image
    fn linked_image(&self) -> Option<&Image> {
        match self.link() {
            Some(link) => link.image.as_ref(),
            None => self.image(),
        }
    }

    /// The linked item named by the link title (info cells)
    fn titled_item(&self) -> Option<LinkedItem> {
        let link = self.link()?;
        Some(LinkedItem {
            label: link.title.clone().unwrap_or_default(),
            image_ref: image_src(link.image.as_ref()),
            link: link.href.clone(),
        })
    }

    /// The linked item named by its image caption (tool and bait cells)
    fn pictured_item(&self) -> Option<LinkedItem> {
        let link = self.link()?;
        let label = link
            .image
            .as_ref()
            .and_then(Image::caption)
            .or(link.title.as_deref())?;
        Some(LinkedItem {
            label: label.to_string(),
            image_ref: image_src(link.image.as_ref()),
            link: link.href.clone(),
        })
    }
}

fn first_descendant<'a>(root: ElementRef<'a>, tag: &str) -> Option<ElementRef<'a>> {
    root.descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == tag)
}

fn image_src(image: Option<&Image>) -> String {
    image.map(|img| img.src.clone()).unwrap_or_default()
}

impl CellContent for Cell {
    fn text(&self) -> &str {
        &self.text
    }

    fn link(&self) -> Option<&Link> {
        self.link.as_ref()
    }

    fn image(&self) -> Option<&Image> {
        self.image.as_ref()
    }
}

/// Missing cells read as empty
impl<C: CellContent> CellContent for Option<&C> {
    fn text(&self) -> &str {
        self.map(CellContent::text).unwrap_or("")
    }

    fn link(&self) -> Option<&Link> {
        self.and_then(CellContent::link)
    }

    fn image(&self) -> Option<&Image> {
        self.and_then(CellContent::image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn first_cell(html: &str) -> Cell {
        let base = Url::parse("https://wiki.test/w/Fishing").unwrap();
        let doc = Html::parse_fragment(&format!("<table><tr>{}</tr></table>", html));
        let sel = Selector::parse("td, th").unwrap();
        let el = doc.select(&sel).next().unwrap();
        Cell::from_element(el, &base).unwrap()
    }

    #[test]
    fn test_reads_link_and_nested_image() {
        let cell = first_cell(
            r#"<td><a href="/w/Trout" title="Trout"><img src="/images/trout.png" alt="Trout"></a> Trout</td>"#,
        );

        assert_eq!(cell.kind, CellKind::Data);
        assert_eq!(cell.text, "Trout");
        let link = cell.link.as_ref().unwrap();
        assert_eq!(link.href, "https://wiki.test/w/Trout");
        assert_eq!(link.title.as_deref(), Some("Trout"));
        assert_eq!(
            link.image.as_ref().unwrap().src,
            "https://wiki.test/images/trout.png"
        );
        assert_eq!(cell.image, link.image);
    }

    #[test]
    fn test_plain_text_cell() {
        let cell = first_cell("<td>  12 </td>");
        assert_eq!(cell.text, "12");
        assert!(cell.link.is_none());
        assert!(cell.image.is_none());
        assert!(cell.titled_item().is_none());
    }

    #[test]
    fn test_image_label_prefers_alt() {
        let cell = first_cell(r#"<th><img src="a.png" alt="" title="Mining"></th>"#);
        assert_eq!(cell.kind, CellKind::Header);
        assert_eq!(cell.image.as_ref().and_then(Image::label), Some("Mining"));

        let cell = first_cell(r#"<th><img src="a.png" alt="Gloves" title="Gear"></th>"#);
        assert_eq!(cell.image.as_ref().and_then(Image::label), Some("Gloves"));
    }

    #[test]
    fn test_caption_prefers_title() {
        let cell = first_cell(
            r#"<td><img src="f.png" alt="Fishing icon.png" title="Fishing"> 5</td>"#,
        );
        let image = cell.image.as_ref().unwrap();
        assert_eq!(image.caption(), Some("Fishing"));
        assert_eq!(image.label(), Some("Fishing icon.png"));

        let cell = first_cell(r#"<td><img src="f.png" alt="Fishing"> 5</td>"#);
        assert_eq!(cell.image.as_ref().and_then(Image::caption), Some("Fishing"));
    }

    #[test]
    fn test_pictured_item_uses_title_over_file_name() {
        let cell = first_cell(
            r#"<td><a href="/w/Small_Net" title="Small Net"><img src="/images/Small_Net.png" alt="Small Net.png" title="Small Net"></a></td>"#,
        );
        assert_eq!(cell.pictured_item().unwrap().label, "Small Net");
    }

    #[test]
    fn test_linked_image_ignores_images_outside_link() {
        let cell = first_cell(r#"<td><img src="x.png" alt="X"><a href="/w/Y">Y</a></td>"#);
        assert!(cell.linked_image().is_none());
        assert!(cell.image().is_some());
    }

    #[test]
    fn test_pictured_item_tolerates_missing_image() {
        let cell = first_cell(r#"<td><a href="/w/Worm" title="Worm">Worm</a></td>"#);
        let item = cell.pictured_item().unwrap();
        assert_eq!(item.label, "Worm");
        assert_eq!(item.image_ref, "");
        assert_eq!(item.link, "https://wiki.test/w/Worm");
    }

    #[test]
    fn test_missing_cell_reads_empty() {
        let missing: Option<&Cell> = None;
        assert_eq!(missing.text(), "");
        assert!(missing.titled_item().is_none());
    }
}
