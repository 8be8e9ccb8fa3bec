use pdf_async_runtime::*;
use pdf_compose::ImageFile;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;

/// Display handle that records its release
struct Handle {
    name: String,
    released: Rc<RefCell<Vec<String>>>,
}

impl Drop for Handle {
    fn drop(&mut self) {
        self.released.borrow_mut().push(self.name.clone());
    }
}

struct Fixture {
    controller: Controller<Handle>,
    released: Rc<RefCell<Vec<String>>>,
}

impl Fixture {
    fn new() -> Self {
        Self {
            controller: Controller::default(),
            released: Rc::new(RefCell::new(Vec::new())),
        }
    }

    fn apply(&mut self, update: PdfUpdate) {
        let released = Rc::clone(&self.released);
        self.controller.apply_update(update, |name, _preview| Handle {
            name: name.to_string(),
            released: Rc::clone(&released),
        });
    }

    fn load_images(&mut self, names: &[&str]) -> Vec<ImageId> {
        let images = names
            .iter()
            .map(|name| LoadedImage {
                file: ImageFile::new(*name, name.as_bytes().to_vec(), (40, 20)),
                preview: preview(),
            })
            .collect();
        self.apply(PdfUpdate::ImagesLoaded { images });
        self.controller.store().ids()
    }

    fn load_source(&mut self, page_count: usize) -> DocumentId {
        let doc_id = DocumentId(7);
        self.apply(PdfUpdate::ExtractLoaded {
            doc_id,
            file_name: "report.pdf".to_string(),
            page_count,
        });
        doc_id
    }

    fn released(&self) -> Vec<String> {
        self.released.borrow().clone()
    }
}

fn preview() -> PreviewImage {
    PreviewImage {
        width: 1,
        height: 1,
        rgba: vec![0, 0, 0, 255],
    }
}

fn output(name: &str) -> OutputDocument {
    OutputDocument {
        file_name: name.to_string(),
        bytes: Arc::from(b"%PDF-1.7".to_vec()),
        page_count: 1,
    }
}

fn severity(controller: &Controller<Handle>) -> Option<Severity> {
    controller.notification().map(|n| n.severity)
}

#[test]
fn test_compose_without_images_warns() {
    let mut fx = Fixture::new();
    assert!(fx.controller.request_compose().is_none());
    assert_eq!(severity(&fx.controller), Some(Severity::Warning));
    assert!(!fx.controller.is_busy());
}

#[test]
fn test_compose_sends_sources_in_list_order() {
    let mut fx = Fixture::new();
    fx.load_images(&["a", "b", "c"]);
    fx.controller.reorder_images(2, 0);

    match fx.controller.request_compose() {
        Some(PdfCommand::ComposeGenerate { sources, options }) => {
            let names: Vec<Vec<u8>> = sources.iter().map(|s| s.to_vec()).collect();
            assert_eq!(names, vec![b"c".to_vec(), b"a".to_vec(), b"b".to_vec()]);
            assert_eq!(options.jpeg_quality, 80);
        }
        other => panic!("Expected ComposeGenerate, got {other:?}"),
    }
    assert!(fx.controller.is_busy());
}

#[test]
fn test_busy_flag_rejects_second_generation() {
    let mut fx = Fixture::new();
    fx.load_images(&["a"]);
    fx.load_source(5);
    fx.controller.range_expression = "1-2".to_string();

    assert!(fx.controller.request_compose().is_some());
    assert!(fx.controller.request_compose().is_none());
    assert!(fx.controller.request_extract().is_none());
    assert!(fx.controller.notification().is_none());

    fx.apply(PdfUpdate::ComposeComplete {
        document: output("converted.pdf"),
    });
    assert!(!fx.controller.is_busy());
    assert!(fx.controller.request_extract().is_some());
}

#[test]
fn test_failure_clears_busy_and_reports_generic_error() {
    let mut fx = Fixture::new();
    fx.load_images(&["a"]);
    fx.controller.request_compose().unwrap();
    fx.apply(PdfUpdate::Progress {
        operation: "Adding pages".to_string(),
        current: 1,
        total: 2,
    });
    assert_eq!(fx.controller.progress().unwrap().fraction(), 0.5);

    fx.apply(PdfUpdate::Error {
        operation: Operation::Compose,
        message: "Image error: bad PNG".to_string(),
    });

    assert!(!fx.controller.is_busy());
    assert!(fx.controller.progress().is_none());
    assert!(fx.controller.pending_output().is_none());
    let notification = fx.controller.notification().unwrap();
    assert_eq!(notification.severity, Severity::Error);
    assert_eq!(notification.message, "Failed to create PDF.");
}

#[test]
fn test_extract_validation() {
    let mut fx = Fixture::new();
    fx.controller.range_expression = "1-3".to_string();
    assert!(fx.controller.request_extract().is_none());
    assert_eq!(
        fx.controller.notification().unwrap().message,
        ValidationError::NoSource.to_string()
    );

    fx.load_source(5);
    for expression in ["", "abc", "3-1"] {
        fx.controller.dismiss_notification();
        fx.controller.range_expression = expression.to_string();
        assert!(fx.controller.request_extract().is_none());
        assert_eq!(severity(&fx.controller), Some(Severity::Warning));
        assert!(!fx.controller.is_busy());
    }
}

#[test]
fn test_extract_sends_parsed_ranges() {
    let mut fx = Fixture::new();
    let doc_id = fx.load_source(5);
    fx.controller.range_expression = "1-3,5".to_string();

    match fx.controller.request_extract() {
        Some(PdfCommand::ExtractGenerate {
            doc_id: requested,
            ranges,
        }) => {
            assert_eq!(requested, doc_id);
            assert_eq!(ranges, vec![0..=2, 4..=4]);
        }
        other => panic!("Expected ExtractGenerate, got {other:?}"),
    }
}

#[test]
fn test_extract_enormous_range_is_a_generation_failure() {
    let mut fx = Fixture::new();
    fx.load_source(5);
    fx.controller.range_expression = "1-18446744073709551615".to_string();

    match fx.controller.request_extract() {
        Some(PdfCommand::ExtractGenerate { ranges, .. }) => {
            assert_eq!(ranges, vec![0..=usize::MAX - 1]);
        }
        other => panic!("Expected ExtractGenerate, got {other:?}"),
    }
    assert!(fx.controller.is_busy());

    fx.apply(PdfUpdate::Error {
        operation: Operation::Extract,
        message: "Page 6 does not exist (document has 5 pages)".to_string(),
    });
    assert!(!fx.controller.is_busy());
    assert_eq!(severity(&fx.controller), Some(Severity::Error));
    assert_eq!(
        fx.controller.notification().unwrap().message,
        "Failed to extract pages."
    );
}

#[test]
fn test_extract_success_offers_output_once() {
    let mut fx = Fixture::new();
    fx.load_source(5);
    fx.controller.range_expression = "2".to_string();
    fx.controller.request_extract().unwrap();

    fx.apply(PdfUpdate::ExtractComplete {
        document: output("split_report.pdf"),
    });
    assert_eq!(severity(&fx.controller), Some(Severity::Success));
    assert_eq!(
        fx.controller.pending_output().unwrap().file_name,
        "split_report.pdf"
    );

    let path = PathBuf::from("/tmp/out.pdf");
    match fx.controller.request_save(path.clone()) {
        Some(PdfCommand::SaveOutput { document, path: p }) => {
            assert_eq!(document.file_name, "split_report.pdf");
            assert_eq!(p, path);
        }
        other => panic!("Expected SaveOutput, got {other:?}"),
    }
    assert!(fx.controller.request_save(path).is_none());
}

#[test]
fn test_cancelled_save_discards_output() {
    let mut fx = Fixture::new();
    fx.load_images(&["a"]);
    fx.controller.request_compose().unwrap();
    fx.apply(PdfUpdate::ComposeComplete {
        document: output("converted.pdf"),
    });

    assert!(fx.controller.take_output().is_some());
    assert!(fx.controller.pending_output().is_none());
}

#[test]
fn test_crop_request_uses_original_and_crop_quality() {
    let mut fx = Fixture::new();
    let ids = fx.load_images(&["a"]);
    fx.controller.options.crop_quality = 95;

    let command = fx.controller.request_crop(
        ids[0],
        CropRect::new(0.0, 0.0, 10.0, 5.0),
        DisplaySize::new(40.0, 20.0),
    );
    match command {
        Some(PdfCommand::ImagesCrop {
            id,
            source,
            quality,
            ..
        }) => {
            assert_eq!(id, ids[0]);
            assert_eq!(&*source, b"a");
            assert_eq!(quality, 95);
        }
        other => panic!("Expected ImagesCrop, got {other:?}"),
    }
}

#[test]
fn test_crop_request_rejects_empty_region() {
    let mut fx = Fixture::new();
    let ids = fx.load_images(&["a"]);
    let command = fx.controller.request_crop(
        ids[0],
        CropRect::new(5.0, 5.0, 0.0, 3.0),
        DisplaySize::new(40.0, 20.0),
    );
    assert!(command.is_none());
    assert_eq!(
        fx.controller.notification().unwrap().message,
        ValidationError::EmptyCropRegion.to_string()
    );
}

fn crop_applied(id: ImageId, bytes: &[u8]) -> PdfUpdate {
    PdfUpdate::CropApplied {
        id,
        image: CroppedImage {
            bytes: Arc::from(bytes.to_vec()),
            width: 10,
            height: 5,
        },
        preview: preview(),
        rect: CropRect::new(0.0, 0.0, 10.0, 5.0),
    }
}

#[test]
fn test_crop_replaces_and_releases_previous() {
    let mut fx = Fixture::new();
    let ids = fx.load_images(&["a"]);

    fx.apply(crop_applied(ids[0], b"first"));
    fx.apply(crop_applied(ids[0], b"second"));

    assert_eq!(fx.released(), vec!["a (cropped)"]);
    let entry = fx.controller.store().get(ids[0]).unwrap();
    assert_eq!(&*entry.effective_bytes(), b"second");
    assert_eq!(entry.effective_dimensions(), (10, 5));
}

#[test]
fn test_late_crop_for_removed_image_is_ignored() {
    let mut fx = Fixture::new();
    let ids = fx.load_images(&["a", "b"]);
    assert!(fx.controller.remove_image(ids[0]));

    fx.apply(crop_applied(ids[0], b"late"));

    assert_eq!(fx.released(), vec!["a"]);
    assert_eq!(fx.controller.store().ids(), vec![ids[1]]);
    assert!(fx.controller.store().get(ids[1]).unwrap().crop().is_none());
}

#[test]
fn test_invalid_reorder_warns_and_keeps_order() {
    let mut fx = Fixture::new();
    let ids = fx.load_images(&["a", "b"]);
    fx.controller.reorder_images(0, 5);

    assert_eq!(fx.controller.store().ids(), ids);
    assert_eq!(severity(&fx.controller), Some(Severity::Warning));
}

#[test]
fn test_new_notification_replaces_old() {
    let mut fx = Fixture::new();
    fx.controller.request_compose();
    fx.apply(PdfUpdate::Error {
        operation: Operation::LoadImages,
        message: "Failed to load photo.png".to_string(),
    });

    let notification = fx.controller.notification().unwrap();
    assert_eq!(notification.severity, Severity::Error);
    assert_eq!(notification.message, "Failed to load photo.png");

    fx.controller.dismiss_notification();
    assert!(fx.controller.notification().is_none());
}

#[test]
fn test_config_loaded_replaces_options() {
    let mut fx = Fixture::new();
    let options = ComposeOptions {
        jpeg_quality: 55,
        ..Default::default()
    };
    fx.apply(PdfUpdate::ConfigLoaded {
        options: options.clone(),
    });
    assert_eq!(fx.controller.options, options);
}

#[test]
fn test_dropping_controller_releases_all_handles() {
    let mut fx = Fixture::new();
    let ids = fx.load_images(&["a", "b"]);
    fx.apply(crop_applied(ids[1], b"crop"));

    let released = Rc::clone(&fx.released);
    drop(fx.controller);

    let mut names = released.borrow().clone();
    names.sort();
    assert_eq!(names, vec!["a", "b", "b (cropped)"]);
}
