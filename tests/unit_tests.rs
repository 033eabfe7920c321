use serde_json::json;
use tana::filter::ListFilterBuilder;
use tana::prelude::*;

#[cfg(test)]
mod tests {
    use super::*;

    fn bleach() -> MangaRecord {
        MangaRecord {
            id: Some(1),
            name: "Bleach".to_string(),
            total_chapters: 700,
            completed_chapters: 690,
            comment: None,
            status: ReadingStatus::Reading,
            release_status: ReleaseStatus::Finished,
            cover_image: None,
            user_id: Some(1),
        }
    }

    #[test]
    fn test_filter_scenario_bleach() {
        let collection = vec![bleach()];

        // Query "blea", filter None -> includes id 1
        let visible = visible_records(&collection, &ListFilter::from("blea"));
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, Some(1));

        // Query "naruto" -> empty
        let visible = visible_records(&collection, &ListFilter::from("naruto"));
        assert!(visible.is_empty());
    }

    #[test]
    fn test_filter_result_is_characterized_by_predicates() {
        let collection = vec![
            bleach(),
            MangaRecord {
                id: Some(2),
                name: "One Piece".to_string(),
                status: ReadingStatus::Reading,
                ..bleach()
            },
            MangaRecord {
                id: Some(3),
                name: "One Punch Man".to_string(),
                status: ReadingStatus::Dropped,
                ..bleach()
            },
        ];

        let filter = ListFilterBuilder::default()
            .query("one")
            .status(Some(ReadingStatus::Reading))
            .build()
            .unwrap();

        let visible = visible_records(&collection, &filter);

        // Every kept element satisfies both predicates
        assert!(visible.iter().all(|r| filter.matches(r)));

        // No dropped element satisfies both
        let kept_ids: Vec<_> = visible.iter().map(|r| r.id).collect();
        for record in collection.iter().filter(|r| !kept_ids.contains(&r.id)) {
            assert!(!filter.matches(record));
        }
    }

    #[test]
    fn test_record_wire_format() {
        let record = bleach();
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["name"], "Bleach");
        assert_eq!(value["totalChapters"], 700);
        assert_eq!(value["completedChapters"], 690);
        assert_eq!(value["status"], "Reading");
        assert_eq!(value["releaseStatus"], "FINISHED");
        assert_eq!(value["userId"], 1);
    }

    #[test]
    fn test_status_wire_spellings() {
        assert_eq!(
            serde_json::to_value(ReadingStatus::ToRead).unwrap(),
            json!("To_Read")
        );
        assert_eq!(
            serde_json::to_value(ReadingStatus::Dropped).unwrap(),
            json!("Dropped")
        );
        assert_eq!(
            serde_json::to_value(ReleaseStatus::Ongoing).unwrap(),
            json!("ONGOING")
        );

        let parsed: ReadingStatus = serde_json::from_value(json!("To_Read")).unwrap();
        assert_eq!(parsed, ReadingStatus::ToRead);
    }

    #[test]
    fn test_record_decodes_backend_json() {
        let body = json!({
            "id": 7,
            "name": "Berserk",
            "totalChapters": 364,
            "completedChapters": 400,
            "comment": null,
            "status": "To_Read",
            "releaseStatus": "ONGOING",
            "coverImage": "https://covers.test/berserk.jpg",
            "userId": 1
        });

        let record: MangaRecord = serde_json::from_value(body).unwrap();
        assert_eq!(record.id, Some(7));
        assert_eq!(record.status, ReadingStatus::ToRead);
        // completed > total is tolerated, never corrected
        assert!(record.completed_chapters > record.total_chapters);
    }

    #[test]
    fn test_cover_image_union() {
        let persisted = CoverImage::Persisted("https://covers.test/a.jpg".to_string());
        assert_eq!(persisted.preview_url(), Some("https://covers.test/a.jpg"));

        let pending = CoverImage::Pending(PendingCover {
            file_name: "a.jpg".to_string(),
            data: bytes::Bytes::from_static(b"img"),
        });
        assert_eq!(pending.preview_url(), None);
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(ReadingStatus::ToRead.label(), "To Read");
        assert_eq!(ReadingStatus::ALL.len(), 4);
        assert_eq!(ReleaseStatus::Finished.label(), "Finished");
    }

    #[test]
    fn test_filter_builder_defaults() {
        let filter = ListFilterBuilder::default().build().unwrap();
        assert!(filter.is_empty());
        assert_eq!(filter, ListFilter::default());

        let filter = ListFilterBuilder::default().query("x").build().unwrap();
        assert!(!filter.is_empty());
    }

    #[test]
    fn test_error_display() {
        let error = tana::Error::api(404, "no manga with id 42");
        assert!(format!("{}", error).contains("404"));

        let error = tana::Error::upload("quota exceeded");
        assert!(format!("{}", error).contains("quota exceeded"));

        let error = tana::Error::SubmitInFlight;
        assert!(format!("{}", error).contains("in flight"));
    }
}
