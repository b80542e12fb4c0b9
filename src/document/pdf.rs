//! Assembles laid-out pages into a PDF file with lopdf.
//!
//! All pages share one resource dictionary: the three faces of the chosen
//! base-14 family (WinAnsi encoded) and, when present, the logo XObject.
//! No timestamps or random IDs are written, so identical input gives
//! identical bytes.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, StringFormat, Stream};

use super::canvas::LOGO_RESOURCE;
use super::logo::LogoImage;
use super::metrics::{FontFace, FontFamily};
use super::text::{encode_win_ansi, sanitize};
use super::units::{mm, PAGE_HEIGHT_MM, PAGE_WIDTH_MM};
use super::ComposeError;

const PRODUCER: &str = "ironbid";

pub fn assemble(
    pages: Vec<Vec<Operation>>,
    family: FontFamily,
    logo: Option<&LogoImage>,
    title: &str,
) -> Result<Vec<u8>, ComposeError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut fonts = Dictionary::new();
    for face in FontFace::ALL {
        fonts.set(
            face.resource_name(),
            dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => family.base_font(face),
                "Encoding" => "WinAnsiEncoding",
            },
        );
    }

    let mut resources = dictionary! { "Font" => fonts };
    if let Some(logo) = logo {
        let image = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => i64::from(logo.width_px),
                "Height" => i64::from(logo.height_px),
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
                "Filter" => "DCTDecode",
            },
            logo.jpeg.clone(),
        )
        .with_compression(false);
        let image_id = doc.add_object(image);
        resources.set("XObject", dictionary! { LOGO_RESOURCE => image_id });
    }
    let resources_id = doc.add_object(resources);

    let media_box: Vec<Object> = vec![
        0.into(),
        0.into(),
        mm(PAGE_WIDTH_MM).into(),
        mm(PAGE_HEIGHT_MM).into(),
    ];

    let mut kids = Vec::with_capacity(pages.len());
    for operations in pages {
        let content = Content { operations }.encode()?;
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => media_box.clone(),
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::String(encode_win_ansi(&sanitize(title)), StringFormat::Literal),
        "Producer" => Object::string_literal(PRODUCER),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    doc.compress();

    let mut output = Vec::new();
    doc.save_to(&mut output)?;
    Ok(output)
}
