use std::io::Write;

use goldenfile::Mint;

use crate::convert::convert_reader;
use crate::report::ReportFormat;
use crate::settings::Settings;

const TESTDATA: &str = "testdata/convert";

pub fn read_testdata(name: &str) -> String {
    std::fs::read_to_string(format!("{}/{}", TESTDATA, name)).expect("read testdata")
}

/// Converts `testdata/convert/<name>` and checks both outputs against
/// `<stem>.jdt.csv` and `<stem>.ojdt.csv` alongside it.
pub fn golden_test(name: &str, format: ReportFormat) {
    let stem = name.trim_end_matches(".csv");
    let mut mint = Mint::new(TESTDATA);
    let mut jdt_out = mint
        .new_goldenfile_with_differ(
            format!("{}.jdt.csv", stem),
            Box::new(goldenfile::differs::text_diff),
        )
        .expect("new goldenfile");
    let mut ojdt_out = mint
        .new_goldenfile_with_differ(
            format!("{}.ojdt.csv", stem),
            Box::new(goldenfile::differs::text_diff),
        )
        .expect("new goldenfile");

    let settings = Settings::default();
    let templates = settings.load_templates(format).expect("load templates");
    let input = std::fs::File::open(format!("{}/{}", TESTDATA, name)).expect("open input");
    let (rendered, summary) = convert_reader(input, &templates, &settings).expect("convert");
    assert_eq!(format, summary.format);

    jdt_out.write_all(&rendered.jdt).expect("write jdt");
    ojdt_out.write_all(&rendered.ojdt).expect("write ojdt");
}

#[macro_export]
macro_rules! assert_csv_eq {
    ($want:expr, $got:expr) => {
        let want_str: &str = $want.as_ref();
        let got_str = String::from_utf8($got.to_vec()).expect("output is UTF-8");
        if want_str != got_str {
            text_diff::assert_diff(want_str, &got_str, "\n", 0);
        }
    };
}
