use chrono::NaiveDate;
use resume_report::layout::OverflowPolicy;
use resume_report::{build_report, AnalysisDocument, ReportConfig};

fn main() {
    // the analysis text as it comes back from the service: plain lines, no markup
    let text = "Experience\n\
                - Led a team of 5\n\
                Weaknesses\n\
                Time management could improve.";

    let analysis = AnalysisDocument::new(
        text,
        "Software Engineer",
        NaiveDate::from_ymd_opt(2025, 3, 14).expect("valid date"),
    );

    // the default config is the single 600x800 page; ask for more pages instead of
    // truncating in case the text grows
    let config = ReportConfig::default().with_overflow(OverflowPolicy::NewPage);
    let report = build_report(&analysis, &config).expect("can lay out report");

    for (i, page) in report.pages().iter().enumerate() {
        println!("page {}:", i + 1);
        for run in page.instructions() {
            println!("  {:>6.1} {:>6.1}  {}", *run.coords.0, *run.coords.1, run.text);
        }
    }

    // saved as Software_Engineer.pdf in the working directory
    report.save(&report.filename).expect("can write report");
}
