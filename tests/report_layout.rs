use chrono::NaiveDate;
use resume_report::layout::{OverflowPolicy, WrapBudget};
use resume_report::{
    build_report, AnalysisDocument, EncodingPolicy, RenderError, ReportConfig, ReportError, Pt,
};

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 14).expect("valid date")
}

fn long_analysis() -> String {
    let mut text = String::from("Experience\n");
    for i in 0..12 {
        text.push_str(&format!("- {}\n", lipsum::lipsum_words(8 + i)));
    }
    text.push_str("\nWeaknesses:\n");
    text.push_str(&lipsum::lipsum(400));
    text.push_str("\n\nSuggestions\n");
    for i in 0..12 {
        text.push_str(&format!("{}. {}\n", i + 1, lipsum::lipsum_words(6)));
    }
    text.push_str("Recommendations\n");
    text.push_str(&lipsum::lipsum(200));
    text
}

#[test]
fn reference_example_renders_to_a_pdf() {
    let analysis = AnalysisDocument::new(
        "Experience\n- Led a team of 5\nWeaknesses\nTime management could improve.",
        "Software Engineer",
        date(),
    );
    let config = ReportConfig::default().with_compression(false);
    let report = build_report(&analysis, &config).expect("report builds");

    let pdf = report.to_bytes().expect("pdf renders");
    assert!(pdf.starts_with(b"%PDF-"));
    let text = String::from_utf8_lossy(&pdf);
    assert!(text.contains("/BaseFont /Helvetica"));
    assert!(text.contains("(Job Role: Software Engineer) Tj"));
    assert!(text.contains("(- Led a team of 5) Tj"));
    assert!(text.contains("(Powered by AI Resume Reviewer) Tj"));
    assert!(!text.contains("Content truncated"));
}

#[test]
fn long_analysis_is_truncated_to_one_page_by_default() {
    let analysis = AnalysisDocument::new(long_analysis(), "Data Scientist", date());
    let report = build_report(&analysis, &ReportConfig::default()).expect("report builds");

    assert!(report.truncated);
    assert_eq!(report.pages().len(), 1);
    let runs = report.pages()[0].instructions();
    let notice = runs
        .iter()
        .find(|run| run.text == "Content truncated due to page limit.")
        .expect("notice drawn");
    assert_eq!(notice.coords, (Pt(50.0), Pt(50.0)));
    assert_eq!(
        runs.last().map(|run| run.text.as_str()),
        Some("Powered by AI Resume Reviewer")
    );
}

#[test]
fn long_analysis_spills_onto_more_pages_when_asked() {
    let analysis = AnalysisDocument::new(long_analysis(), "Data Scientist", date());
    let config = ReportConfig::default().with_overflow(OverflowPolicy::NewPage);
    let report = build_report(&analysis, &config).expect("report builds");

    assert!(!report.truncated);
    assert!(report.pages().len() > 1);
    for page in report.pages() {
        for run in page.instructions() {
            assert!(run.coords.1 >= Pt(0.0) && run.coords.1 <= page.height());
            assert_ne!(run.text, "Content truncated due to page limit.");
        }
    }

    let titles: Vec<&str> = report
        .outline()
        .entries()
        .iter()
        .map(|entry| entry.title.as_str())
        .collect();
    assert_eq!(
        titles,
        vec!["Experience", "Weaknesses", "Suggestions", "Recommendations"]
    );
    let last_page = report.outline().entries()[3].page_index;
    assert!(last_page > 0);

    // header only on the first page
    let second_page: Vec<&str> = report.pages()[1]
        .instructions()
        .iter()
        .map(|run| run.text.as_str())
        .collect();
    assert!(!second_page.contains(&"AI Resume Analysis Report"));
}

#[test]
fn measured_wrap_keeps_lines_inside_the_margins() {
    let analysis = AnalysisDocument::new(lipsum::lipsum(250), "", date());
    let config = ReportConfig::default()
        .with_wrap(WrapBudget::Measured)
        .with_overflow(OverflowPolicy::NewPage);
    let report = build_report(&analysis, &config).expect("report builds");

    let font = report.document().fonts.iter().next().map(|(_, font)| font).expect("font");
    for page in report.pages() {
        for run in page.instructions() {
            let right = run.coords.0 + font.width_of_text(&run.text, run.font.size);
            assert!(right <= Pt(550.5), "{:?} runs to {right}", run.text);
        }
    }
}

#[test]
fn report_is_written_to_disk() {
    let dir = tempfile::tempdir().expect("temp dir");
    let analysis = AnalysisDocument::new(long_analysis(), "UX/UI Designer", date());
    let report = build_report(&analysis, &ReportConfig::default()).expect("report builds");

    let path = dir.path().join(&report.filename);
    report.save(&path).expect("saved");
    assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("UX_UI_Designer.pdf"));

    let bytes = std::fs::read(&path).expect("read back");
    assert!(bytes.starts_with(b"%PDF-"));
    assert!(String::from_utf8_lossy(&bytes).contains("/FlateDecode"));
}

#[test]
fn strict_encoding_reports_unencodable_characters() {
    let analysis = AnalysisDocument::new("Experience\n- Shipped 🚀 fast", "AI Engineer", date());

    let lenient = build_report(&analysis, &ReportConfig::default()).expect("report builds");
    assert!(lenient.to_bytes().is_ok());

    let strict = build_report(
        &analysis,
        &ReportConfig::default().with_encoding(EncodingPolicy::Strict),
    )
    .expect("layout does not encode");
    match strict.to_bytes() {
        Err(ReportError::Render(RenderError::Unencodable { ch, .. })) => assert_eq!(ch, '🚀'),
        other => panic!("expected an encoding failure, got {:?}", other.map(|b| b.len())),
    }
}

#[test]
fn config_file_drives_the_layout() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("report.json");
    std::fs::write(
        &path,
        r#"{
            "title": "Résumé Review",
            "overflow": "new_page",
            "vocabulary": { "headers": ["Strengths"] }
        }"#,
    )
    .expect("write config");

    let config = ReportConfig::from_json_file(&path).expect("config loads");
    let analysis = AnalysisDocument::new("Strengths\nExperience", "", date());
    let report = build_report(&analysis, &config).expect("report builds");

    let runs = report.pages()[0].instructions();
    assert_eq!(runs[0].text, "Résumé Review");
    assert_eq!(runs[3].text, "Strengths");
    assert_eq!(runs[3].font.size, Pt(14.0));
    assert_eq!(runs[4].text, "Experience");
    assert_eq!(runs[4].font.size, Pt(11.0));
}
