use parlance::domain::ContentType;

#[test]
fn given_declared_mime_when_detecting_then_mime_wins_over_extension() {
    assert_eq!(
        ContentType::detect(Some("text/plain; charset=utf-8"), "report.pdf"),
        ContentType::Text
    );
}

#[test]
fn given_generic_mime_when_detecting_then_falls_back_to_extension() {
    assert_eq!(
        ContentType::detect(Some("application/octet-stream"), "README.MD"),
        ContentType::Text
    );
}

#[test]
fn given_unknown_mime_and_extension_when_detecting_then_treated_as_pdf() {
    assert_eq!(ContentType::detect(None, "scan"), ContentType::Pdf);
    assert_eq!(ContentType::detect(None, "photo.jpeg"), ContentType::Pdf);
}

#[test]
fn given_content_type_when_rendering_mime_then_round_trips() {
    for content_type in [ContentType::Pdf, ContentType::Text] {
        assert_eq!(ContentType::from_mime(content_type.as_mime()), Some(content_type));
    }
}
