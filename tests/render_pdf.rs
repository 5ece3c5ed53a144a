use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{NaiveDate, NaiveDateTime};
use image::{DynamicImage, ImageOutputFormat, Rgba, RgbaImage};
use lopdf::content::Content;
use lopdf::{Document, Object};

use quotation_pdf::{
    render_quotation_json, render_quotation_pdf_with_options, Client, LineItem, LogoImage,
    QuotationRecord, QuotationStatus, RenderOptions,
};

fn generated_at() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 15)
        .unwrap()
        .and_hms_opt(14, 30, 5)
        .unwrap()
}

fn options() -> RenderOptions {
    RenderOptions::default().with_generated_at(generated_at())
}

fn quotation(item_count: usize) -> QuotationRecord {
    QuotationRecord {
        quotation_number: "2024-042".to_string(),
        issue_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        valid_until: NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        status: QuotationStatus::Pending,
        client: Some(Client {
            name: Some("Maria Souza".to_string()),
            email: Some("maria@example.com".to_string()),
            phone: Some("(11) 5555-0101".to_string()),
            address: Some("Rua das Flores, 10".to_string()),
            city: Some("São Paulo".to_string()),
            state: Some("SP".to_string()),
        }),
        items: (0..item_count)
            .map(|i| LineItem::new(format!("Item {}", i + 1), 2.0, 10.5, 21.0))
            .collect(),
        total_amount: 21.0 * item_count as f64,
        notes: Some("Pagamento em 30 dias.\nFrete incluso.".to_string()),
    }
}

fn png_logo(width: u32, height: u32) -> Vec<u8> {
    let image = RgbaImage::from_pixel(width, height, Rgba([0, 120, 200, 255]));
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(image)
        .write_to(&mut out, ImageOutputFormat::Png)
        .unwrap();
    out.into_inner()
}

fn winansi(text: &str) -> Vec<u8> {
    // The labels used below only contain Latin-1 characters
    text.chars().map(|c| c as u32 as u8).collect()
}

/// Every string shown with `Tj` on each page, in page order
fn page_texts(bytes: &[u8]) -> Vec<Vec<Vec<u8>>> {
    let doc = Document::load_mem(bytes).unwrap();
    doc.get_pages()
        .values()
        .map(|&page_id| {
            let data = doc.get_page_content(page_id).unwrap();
            let content = Content::decode(&data).unwrap();
            content
                .operations
                .iter()
                .filter(|op| op.operator == "Tj")
                .filter_map(|op| match op.operands.first() {
                    Some(Object::String(text, _)) => Some(text.clone()),
                    _ => None,
                })
                .collect()
        })
        .collect()
}

fn contains_fragment(texts: &[Vec<u8>], fragment: &str) -> bool {
    let needle = winansi(fragment);
    texts
        .iter()
        .any(|text| text.windows(needle.len()).any(|window| window == needle.as_slice()))
}

fn image_xobject_count(bytes: &[u8]) -> usize {
    let doc = Document::load_mem(bytes).unwrap();
    doc.objects
        .values()
        .filter(|object| match object {
            Object::Stream(stream) => {
                stream.dict.get(b"Subtype").ok() == Some(&Object::Name(b"Image".to_vec()))
            }
            _ => false,
        })
        .count()
}

#[test]
fn test_single_page_quotation() {
    let bytes = render_quotation_pdf_with_options(&quotation(3), None, &options()).unwrap();
    assert!(bytes.starts_with(b"%PDF"));

    let pages = page_texts(&bytes);
    assert_eq!(pages.len(), 1);
    let texts = &pages[0];
    assert!(texts.contains(&winansi("ORÇAMENTO")));
    assert!(texts.contains(&winansi("Nº 2024-042")));
    assert!(contains_fragment(texts, "São Paulo, SP"));
    assert!(texts.contains(&winansi("Pendente")));
    assert!(texts.contains(&winansi("R$ 63.00")));
    assert!(texts.contains(&winansi("Frete incluso.")));
    assert!(texts.contains(&winansi("Documento gerado em 15/03/2024 às 14:30:05")));
    assert!(texts.contains(&winansi("Página 1 de 1")));
}

#[test]
fn test_long_item_list_spans_pages() {
    let bytes = render_quotation_pdf_with_options(&quotation(60), None, &options()).unwrap();
    let pages = page_texts(&bytes);
    assert!(pages.len() > 1);

    let total = pages.len();
    for (index, texts) in pages.iter().enumerate() {
        let stamp = winansi(&format!("Página {} de {}", index + 1, total));
        assert!(texts.contains(&stamp), "page {} lacks its stamp", index + 1);
    }
    assert!(pages[1].contains(&winansi("CONTINUAÇÃO DO ORÇAMENTO")));

    let item_rows: usize = pages
        .iter()
        .flatten()
        .filter(|text| text.starts_with(b"Item "))
        .count();
    assert_eq!(item_rows, 60);

    // Footer only on the last page
    let disclaimer = winansi("Orçamento gerado automaticamente pelo sistema.");
    assert!(pages[total - 1].contains(&disclaimer));
    assert!(pages[..total - 1].iter().all(|texts| !texts.contains(&disclaimer)));
}

#[test]
fn test_output_is_deterministic_with_fixed_timestamp() {
    let q = quotation(25);
    let first = render_quotation_pdf_with_options(&q, None, &options()).unwrap();
    let second = render_quotation_pdf_with_options(&q, None, &options()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_malformed_logo_renders_like_no_logo() {
    let q = quotation(2);
    let without = render_quotation_pdf_with_options(&q, None, &options()).unwrap();

    let garbage = LogoImage::Bytes(b"definitely not a png".to_vec());
    let with_garbage = render_quotation_pdf_with_options(&q, Some(&garbage), &options()).unwrap();
    assert_eq!(without, with_garbage);

    let link = LogoImage::from("https://cdn.example.com/logo.png");
    let with_link = render_quotation_pdf_with_options(&q, Some(&link), &options()).unwrap();
    assert_eq!(without, with_link);
    assert_eq!(image_xobject_count(&without), 0);
}

#[test]
fn test_png_logo_is_embedded() {
    let q = quotation(2);
    let raw = LogoImage::Bytes(png_logo(300, 100));
    let bytes = render_quotation_pdf_with_options(&q, Some(&raw), &options()).unwrap();
    assert_eq!(image_xobject_count(&bytes), 1);

    let data_url = LogoImage::DataUrl(format!(
        "data:image/png;base64,{}",
        STANDARD.encode(png_logo(300, 100))
    ));
    let from_url = render_quotation_pdf_with_options(&q, Some(&data_url), &options()).unwrap();
    assert_eq!(bytes, from_url);
}

#[test]
fn test_empty_quotation_renders_placeholder() {
    let mut q = quotation(0);
    q.client = None;
    q.notes = Some("   ".to_string());
    q.status = QuotationStatus::from("em análise");

    let bytes = render_quotation_pdf_with_options(&q, None, &options()).unwrap();
    let pages = page_texts(&bytes);
    assert_eq!(pages.len(), 1);
    assert!(pages[0].contains(&winansi("Nenhum item no orçamento")));
    assert!(pages[0].contains(&winansi("em análise")));
    assert!(!pages[0].contains(&winansi("OBSERVAÇÕES")));
}

#[test]
fn test_render_from_stored_json_row() {
    let json = r#"{
        "quotation_number": "2024-100",
        "issue_date": "2024-04-10",
        "valid_until": "2024-05-10",
        "status": "approved",
        "clients": {"name": "ACME Ltda", "city": "Recife", "state": "PE"},
        "quotation_items": [
            {"description": "Consultoria", "quantity": "3", "unit_price": "150.00", "total_price": "450.00"}
        ],
        "total_amount": "450.00",
        "notes": null
    }"#;
    let bytes = render_quotation_json(json, None).unwrap();
    let pages = page_texts(&bytes);
    assert!(pages[0].contains(&winansi("Aprovado")));
    assert!(pages[0].contains(&winansi("R$ 450.00")));
    assert!(contains_fragment(&pages[0], "Recife, PE"));
}
