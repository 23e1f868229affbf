use modtran_core::{ModtranError, ReportColumn, parse_report};

// Header block shaped like the simulator's scanned report: run banner,
// card echo, blank spacing, then the column caption lines.
const HEADER: [&str; 11] = [
    "1",
    " MODTRAN4 Version 3 Revision 1",
    "",
    " CARD 1: MS  2    2    2   -1    0    0    0    0    0    0    1    0    0",
    "",
    " SLIT FUNCTION SPECTRAL RESPONSE",
    "",
    "  WAVELEN   TRANS  PTH THRML  THRML SCT  SURF EMIS   SOL SCAT  SING SCAT",
    "   MCRN                                                                 ",
    "",
    "",
];

const FOOTER: &str = " -9999.";

fn data_line(values: [&str; 13]) -> String {
    let mut line = vec![b' '; 134];
    for (column, value) in ReportColumn::ALL.iter().zip(values) {
        let (start, end) = column.slice();
        assert!(value.len() <= end - start, "{} overflows", column.label());
        line[end - value.len()..end].copy_from_slice(value.as_bytes());
    }
    String::from_utf8(line).unwrap()
}

fn fixture(data: &[String]) -> String {
    let mut lines: Vec<String> = HEADER.iter().map(|line| line.to_string()).collect();
    lines.extend(data.iter().cloned());
    lines.push(FOOTER.to_string());
    lines.join("\n")
}

fn sample_rows() -> Vec<String> {
    [
        ["0.3500", "0.5922", "0.00E+00", "0.00E+00", "0.00E+00", "5.17E-06", "2.70E-06",
         "1.06E-05", "8.97E-06", "1.58E-05", "4.2E-05", "9.3E-05", "0.524"],
        ["0.3550", "0.6103", "0.00E+00", "0.00E+00", "0.00E+00", "5.44E-06", "2.81E-06",
         "1.15E-05", "9.72E-06", "1.69E-05", "4.4E-05", "9.6E-05", "0.494"],
        ["0.3600", "0.6279", "0.00E+00", "0.00E+00", "0.00E+00", "5.69E-06", "2.92E-06",
         "1.24E-05", "1.05E-05", "1.81E-05", "4.6E-05", "9.9E-05", "0.465"],
    ]
    .iter()
    .map(|row| data_line(*row))
    .collect()
}

#[test]
fn scan_report_decodes_to_three_rows_and_thirteen_columns() {
    let report = parse_report(&fixture(&sample_rows())).unwrap();

    assert_eq!(report.rows(), 3);
    assert_eq!(report.wavelength_microns(), &[0.35, 0.355, 0.36]);
    assert_eq!(report.transmission(), &[0.5922, 0.6103, 0.6279]);
    assert_eq!(
        report.column(ReportColumn::SolarScatter),
        &[5.17e-6, 5.44e-6, 5.69e-6]
    );
    assert_eq!(
        report.column(ReportColumn::TotalRadiance),
        &[1.58e-5, 1.69e-5, 1.81e-5]
    );
    assert_eq!(
        report.column(ReportColumn::Depth),
        &[0.524, 0.494, 0.465]
    );
    for column in ReportColumn::ALL {
        assert_eq!(report.column(column).len(), 3, "{}", column.label());
    }
}

#[test]
fn raw_lines_are_returned_verbatim() {
    let text = fixture(&sample_rows());
    let report = parse_report(&text).unwrap();

    let expected: Vec<&str> = text.lines().collect();
    assert_eq!(report.raw_lines().len(), expected.len());
    for (raw, original) in report.raw_lines().iter().zip(expected) {
        assert_eq!(raw, original);
    }
}

#[test]
fn non_numeric_cell_blanks_one_column_and_spares_the_rest() {
    let mut rows = sample_rows();
    let (start, end) = ReportColumn::SingleScatter.slice();
    rows[2].replace_range(start..end, "**********");

    let report = parse_report(&fixture(&rows)).unwrap();
    assert!(
        report
            .column(ReportColumn::SingleScatter)
            .iter()
            .all(|value| value.is_nan())
    );
    assert_eq!(report.wavelength_microns(), &[0.35, 0.355, 0.36]);
    assert_eq!(
        report.column(ReportColumn::GroundReflected),
        &[1.06e-5, 1.15e-5, 1.24e-5]
    );
}

#[test]
fn report_shorter_than_header_and_footer_is_rejected() {
    // ten non-empty lines; a trailing blank element would leave the joined
    // text ending in '\n' and str::lines() would count one line fewer
    let text = (0..10)
        .map(|index| format!(" h{index}"))
        .collect::<Vec<_>>()
        .join("\n");

    assert!(matches!(
        parse_report(&text).unwrap_err(),
        ModtranError::MalformedReport {
            total_lines: 10,
            required: 12,
            ..
        }
    ));
}
