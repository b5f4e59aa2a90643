//! Snapshot tests for the page view wire shape.

use insta::assert_snapshot;
use pacer::{Answer, InMemoryRepository, ListController, Record, ScreenConfig};

#[test]
fn test_faq_page_view_json() {
    let repo = InMemoryRepository::with_records(vec![
        Record::new(1u64, "Bib pickup?")
            .author("kim")
            .date("2025-03-01")
            .views(12),
        Record::new(2u64, "Refund?")
            .author("lee")
            .date("2025-03-02")
            .views(3)
            .answer(Answer::new("admin", "2025-03-03", "Until March 10.")),
    ]);
    let mut faqs = ListController::new(ScreenConfig::preset("faqs").unwrap(), repo).unwrap();

    let output = serde_json::to_string_pretty(&faqs.view().unwrap()).unwrap();
    assert_snapshot!(output, @r#"
    {
      "screen": "faqs",
      "rows": [
        {
          "key": "2",
          "displayTitle": "Refund?",
          "id": 2,
          "title": "Refund?",
          "author": "lee",
          "date": "2025-03-02",
          "views": 3,
          "content": "",
          "__isReply": false,
          "displayNo": 2
        },
        {
          "key": "2:reply",
          "displayTitle": "[RE] Refund?",
          "id": 2,
          "title": "Refund?",
          "author": "admin",
          "date": "2025-03-03",
          "views": 0,
          "content": "Until March 10.",
          "__replyOf": 2,
          "__isReply": true
        },
        {
          "key": "1",
          "displayTitle": "Bib pickup?",
          "id": 1,
          "title": "Bib pickup?",
          "author": "kim",
          "date": "2025-03-01",
          "views": 12,
          "content": "",
          "__isReply": false,
          "displayNo": 1
        }
      ],
      "pagination": {
        "page": 1,
        "pageSize": 10,
        "total": 2,
        "lastPage": 1,
        "hasPrev": false,
        "hasNext": false,
        "pages": [
          1
        ]
      },
      "sort": "new",
      "sorts": [
        "new",
        "old",
        "hit"
      ]
    }
    "#);
}

#[test]
fn test_filtered_page_view_summary() {
    let repo = InMemoryRepository::with_records(vec![Record::new(1u64, "Course map")
        .date("2025-03-01")
        .attr("visibility", "public")]);
    let mut notices = ListController::new(ScreenConfig::preset("notices").unwrap(), repo).unwrap();
    notices.apply_params([("q", "course"), ("visibility", "public")]);

    let view = notices.view().unwrap();
    assert_snapshot!(view.filter_summary.unwrap_or_default(), @"title contains 'course', visibility=public");
}
