#[cfg(test)]
mod tests {
    use student_cli::app_state::AppState;
    use student_cli::data::filter::compute_view;
    use student_cli::data::paginate::paginate;
    use student_cli::data::record::StudentRecord;
    use student_cli::data::sort::SortColumn;
    use student_cli::data::store::StudentStore;
    use student_cli::presenter::Presenter;
    use student_cli::storage::MemoryBackend;

    struct RecordingPresenter {
        pages: Vec<(Vec<u64>, usize, usize)>,
        notices: Vec<String>,
    }

    impl RecordingPresenter {
        fn new() -> Self {
            Self {
                pages: Vec::new(),
                notices: Vec::new(),
            }
        }

        fn last_page(&self) -> &(Vec<u64>, usize, usize) {
            self.pages.last().expect("nothing rendered")
        }
    }

    impl Presenter for RecordingPresenter {
        fn render_page(
            &mut self,
            rows: &[&StudentRecord],
            current_page: usize,
            total_pages: usize,
        ) {
            self.pages.push((
                rows.iter().map(|r| r.id).collect(),
                current_page,
                total_pages,
            ));
        }

        fn notify(&mut self, message: &str) {
            self.notices.push(message.to_string());
        }

        fn notify_error(&mut self, message: &str) {
            self.notices.push(format!("error: {message}"));
        }

        fn confirm(&mut self, _prompt: &str) -> bool {
            true
        }
    }

    fn record(id: u64, name: &str, age: u32, course: &str, status: &str) -> StudentRecord {
        serde_json::from_str(&format!(
            r#"{{"id":{id},"name":"{name}","age":{age},"course":"{course}",
                 "email":"{name}@x.com","phone":"555-0{id}",
                 "address":{{"city":"X","area":"Y","zip":"1"}},"status":"{status}"}}"#
        ))
        .unwrap()
    }

    fn roster() -> Vec<StudentRecord> {
        vec![
            record(1, "Ann", 19, "CS", "Active"),
            record(2, "Bob", 20, "Math", "Inactive"),
            record(3, "Cat", 21, "CS", "Active"),
            record(4, "Dan", 22, "Physics", "Graduated"),
            record(5, "Eve", 23, "CS", "Active"),
            record(6, "Fay", 24, "Math", "Active"),
            record(7, "Gus", 25, "CS", "Inactive"),
        ]
    }

    fn app_with(records: Vec<StudentRecord>, rows_per_page: usize) -> AppState {
        let mut store = StudentStore::new(Box::new(MemoryBackend::new()));
        for r in records {
            store.add(r).unwrap();
        }
        AppState::new(store, rows_per_page)
    }

    #[test]
    fn test_filter_sort_paginate_render_flow() {
        let mut app = app_with(roster(), 2);
        let mut presenter = RecordingPresenter::new();

        // search keystroke: CS students only, back on page 1
        app.on_search("", "CS", "");
        app.render(&mut presenter);
        let (ids, page, total) = presenter.last_page().clone();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!((page, total), (1, 2));

        // page click
        app.on_page(2);
        app.render(&mut presenter);
        let (ids, page, _) = presenter.last_page().clone();
        assert_eq!(ids, vec![5, 7]);
        assert_eq!(page, 2);

        // sort-header click reorders the authoritative list (first click
        // is descending) and the filtered view follows
        app.on_sort(SortColumn::Age).unwrap();
        app.on_page(1);
        app.render(&mut presenter);
        let (ids, _, _) = presenter.last_page().clone();
        assert_eq!(ids, vec![7, 5]);
    }

    #[test]
    fn test_pages_of_filtered_view_reconstruct_it_exactly() {
        let app = app_with(roster(), 3);
        let view = compute_view(app.store().records(), "", "", "Active");
        let (_, total) = paginate(&view, 1, 3);

        let mut rebuilt: Vec<u64> = Vec::new();
        for page in 1..=total {
            let (slice, _) = paginate(&view, page, 3);
            assert!(slice.len() <= 3);
            rebuilt.extend(slice.iter().map(|r| r.id));
        }

        let expected: Vec<u64> = view.iter().map(|r| r.id).collect();
        assert_eq!(rebuilt, expected);
    }

    #[test]
    fn test_delete_during_filtered_view_targets_the_right_record() {
        let mut app = app_with(roster(), 5);

        // narrow the view, then delete by id; the record that disappears
        // is the one asked for, regardless of its filtered position
        app.on_search("", "Math", "");
        assert!(app.on_delete(6).unwrap());
        assert_eq!(app.store().len(), 6);
        assert!(app.store().index_of(6).is_none());
        assert!(app.store().index_of(2).is_some());
    }

    #[test]
    fn test_edit_save_renders_updated_record() {
        let mut app = app_with(roster(), 10);
        let mut presenter = RecordingPresenter::new();

        let form = app.on_edit(4).unwrap();
        assert_eq!(form.name, "Dan");

        let mut updated = form.clone();
        updated.name = "Daniel".to_string();
        updated.status = "Active".to_string();
        app.on_save(updated).unwrap();

        app.on_search("daniel", "", "");
        app.render(&mut presenter);
        let (ids, _, _) = presenter.last_page().clone();
        assert_eq!(ids, vec![4]);
    }

    #[test]
    fn test_clear_then_paginate_reports_empty_without_error() {
        let mut app = app_with(roster(), 5);
        app.on_clear().unwrap();

        let view = compute_view(app.store().records(), "", "", "");
        let (slice, total) = paginate(&view, 1, 5);
        assert!(slice.is_empty());
        assert_eq!(total, 0);
    }

    #[test]
    fn test_export_roundtrip_line_count_and_header() {
        let app = app_with(roster(), 5);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("students.csv");

        let message = app.on_export(&path).unwrap();
        assert!(message.contains("7 rows"));

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.trim_end().lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(
            lines[0],
            "ID,Name,Age,Course,Email,Phone,City,Area,ZIP,Status"
        );
    }
}
