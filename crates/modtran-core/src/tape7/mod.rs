//! Fixed-column report decoder.
//!
//! The simulator's scanned report (`tape7.scn`) carries 11 header lines,
//! one footer line, and 13 numeric columns at fixed byte offsets. Adjacent
//! columns can touch with no separating space at extreme values, so rows
//! are sliced by position, never tokenized by whitespace.

use crate::domain::{ModtranError, ModtranResult};

pub const HEADER_LINES: usize = 11;
pub const FOOTER_LINES: usize = 1;
pub const COLUMN_COUNT: usize = 13;

/// The 13 physical quantities of a report row, in column order. The last
/// three are carried through opaquely; the simulator's manual does not
/// define them precisely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportColumn {
    /// Wavelength [micron].
    Wavelength,
    /// Direct-path transmission between target and sensor.
    Transmission,
    /// Thermal emission of the atmosphere toward the observer.
    PathThermal,
    /// Surface thermal emission scattered toward the observer.
    ThermalScatter,
    /// Surface thermal emission along the direct path.
    SurfaceEmission,
    /// Solar radiance scattered from atmosphere and background.
    SolarScatter,
    /// Solar radiance scattered once from the atmosphere.
    SingleScatter,
    /// Direct plus indirect solar radiance reflected from the target.
    GroundReflected,
    /// Direct solar radiance reflected from the target.
    DirectReflected,
    /// Total radiance toward the observer.
    TotalRadiance,
    /// Opaque pass-through (REF SOL).
    ReferenceSolar,
    /// Opaque pass-through (SOL@OBS).
    SolarAtObserver,
    /// Opaque pass-through (DEPTH).
    Depth,
}

impl ReportColumn {
    pub const ALL: [Self; COLUMN_COUNT] = [
        Self::Wavelength,
        Self::Transmission,
        Self::PathThermal,
        Self::ThermalScatter,
        Self::SurfaceEmission,
        Self::SolarScatter,
        Self::SingleScatter,
        Self::GroundReflected,
        Self::DirectReflected,
        Self::TotalRadiance,
        Self::ReferenceSolar,
        Self::SolarAtObserver,
        Self::Depth,
    ];

    /// Column label as printed in the report header.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Wavelength => "WAVELEN MCRN",
            Self::Transmission => "TRANS",
            Self::PathThermal => "PTH THRML",
            Self::ThermalScatter => "THRML SCT",
            Self::SurfaceEmission => "SURF EMIS",
            Self::SolarScatter => "SOL SCAT",
            Self::SingleScatter => "SING SCAT",
            Self::GroundReflected => "GRND RFLT",
            Self::DirectReflected => "DRCT RFLT",
            Self::TotalRadiance => "TOTAL RAD",
            Self::ReferenceSolar => "REF SOL",
            Self::SolarAtObserver => "SOL@OBS",
            Self::Depth => "DEPTH",
        }
    }

    /// Byte range `[start, end)` of the column within a data line.
    pub const fn slice(self) -> (usize, usize) {
        match self {
            Self::Wavelength => (4, 12),
            Self::Transmission => (13, 19),
            Self::PathThermal => (20, 30),
            Self::ThermalScatter => (31, 41),
            Self::SurfaceEmission => (42, 52),
            Self::SolarScatter => (53, 63),
            Self::SingleScatter => (64, 74),
            Self::GroundReflected => (75, 85),
            Self::DirectReflected => (86, 96),
            Self::TotalRadiance => (97, 107),
            Self::ReferenceSolar => (108, 116),
            Self::SolarAtObserver => (117, 125),
            Self::Depth => (129, 134),
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// Decoded report: one numeric column per physical quantity plus the raw
/// line sequence, so callers can re-slice if a layout assumption breaks.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanReport {
    raw_lines: Vec<String>,
    columns: Vec<Vec<f64>>,
}

/// Parses the full report text. Columns with any unparsable cell come back
/// as NaN sentinels for every row; the remaining columns are unaffected.
pub fn parse_report(text: &str) -> ModtranResult<ScanReport> {
    let raw_lines: Vec<String> = text.lines().map(str::to_string).collect();
    let required = HEADER_LINES + FOOTER_LINES;
    if raw_lines.len() < required {
        return Err(ModtranError::MalformedReport {
            total_lines: raw_lines.len(),
            required,
            header: HEADER_LINES,
            footer: FOOTER_LINES,
        });
    }
    let data_lines = &raw_lines[HEADER_LINES..raw_lines.len() - FOOTER_LINES];

    let columns = ReportColumn::ALL
        .iter()
        .map(|column| {
            let (start, end) = column.slice();
            let parsed: Option<Vec<f64>> = data_lines
                .iter()
                .map(|line| cell(line, start, end).trim().parse::<f64>().ok())
                .collect();
            parsed.unwrap_or_else(|| {
                tracing::debug!(
                    column = column.label(),
                    "column failed to parse; substituting NaN sentinels"
                );
                vec![f64::NAN; data_lines.len()]
            })
        })
        .collect();

    Ok(ScanReport { raw_lines, columns })
}

fn cell(line: &str, start: usize, end: usize) -> &str {
    let end = end.min(line.len());
    if start >= end {
        return "";
    }
    line.get(start..end).unwrap_or("")
}

impl ScanReport {
    pub fn rows(&self) -> usize {
        self.raw_lines.len() - HEADER_LINES - FOOTER_LINES
    }

    /// Every line of the report, header and footer included.
    pub fn raw_lines(&self) -> &[String] {
        &self.raw_lines
    }

    pub fn column(&self, column: ReportColumn) -> &[f64] {
        &self.columns[column.index()]
    }

    pub fn wavelength_microns(&self) -> &[f64] {
        self.column(ReportColumn::Wavelength)
    }

    pub fn transmission(&self) -> &[f64] {
        self.column(ReportColumn::Transmission)
    }

    pub fn total_radiance(&self) -> &[f64] {
        self.column(ReportColumn::TotalRadiance)
    }
}

#[cfg(test)]
mod tests {
    use super::{COLUMN_COUNT, ReportColumn, parse_report};
    use crate::domain::ModtranError;

    // Builds a 134-character data line with each value right-justified in
    // its column slice.
    fn data_line(values: [&str; COLUMN_COUNT]) -> String {
        let mut line = vec![b' '; 134];
        for (column, value) in ReportColumn::ALL.iter().zip(values) {
            let (start, end) = column.slice();
            let slot = end - start;
            assert!(value.len() <= slot);
            line[end - value.len()..end].copy_from_slice(value.as_bytes());
        }
        String::from_utf8(line).unwrap()
    }

    fn report(data: &[String]) -> String {
        let mut lines: Vec<String> = (0..super::HEADER_LINES)
            .map(|index| format!(" header line {index}"))
            .collect();
        lines.extend(data.iter().cloned());
        lines.push(" -9999.".to_string());
        lines.join("\n")
    }

    fn sample_line(wavelength: f64) -> String {
        data_line([
            &format!("{wavelength:.4}"),
            "0.9120",
            "1.23E-09",
            "0.00E+00",
            "4.56E-08",
            "7.89E-06",
            "3.21E-06",
            "5.55E-06",
            "4.44E-06",
            "1.01E-05",
            "2.2E-05",
            "6.1E-05",
            "0.123",
        ])
    }

    #[test]
    fn clean_report_decodes_every_column() {
        let data: Vec<String> = [0.35, 0.355, 0.36]
            .iter()
            .map(|&w| sample_line(w))
            .collect();
        let report = parse_report(&report(&data)).unwrap();

        assert_eq!(report.rows(), 3);
        assert_eq!(report.wavelength_microns(), &[0.35, 0.355, 0.36]);
        assert_eq!(report.transmission(), &[0.912; 3]);
        assert_eq!(report.column(ReportColumn::PathThermal), &[1.23e-9; 3]);
        assert_eq!(report.column(ReportColumn::Depth), &[0.123; 3]);
        assert_eq!(report.raw_lines().len(), 15);
    }

    #[test]
    fn one_bad_cell_blanks_its_whole_column_only() {
        let mut data: Vec<String> = [0.35, 0.355, 0.36]
            .iter()
            .map(|&w| sample_line(w))
            .collect();
        // corrupt one transmission cell
        let (start, end) = ReportColumn::Transmission.slice();
        data[1].replace_range(start..end, "******");

        let report = parse_report(&report(&data)).unwrap();
        assert!(report.transmission().iter().all(|value| value.is_nan()));
        assert_eq!(report.wavelength_microns(), &[0.35, 0.355, 0.36]);
        assert_eq!(report.total_radiance(), &[1.01e-5; 3]);
    }

    #[test]
    fn row_count_tracks_the_data_section_not_the_columns() {
        let mut data: Vec<String> = [0.35, 0.355].iter().map(|&w| sample_line(w)).collect();
        let (start, end) = ReportColumn::Wavelength.slice();
        data[0].replace_range(start..end, "????????");

        let report = parse_report(&report(&data)).unwrap();
        assert_eq!(report.rows(), 2);
        assert!(report.wavelength_microns().iter().all(|value| value.is_nan()));
    }

    #[test]
    fn short_lines_blank_the_trailing_columns() {
        let mut data = vec![sample_line(0.35)];
        data[0].truncate(100);

        let report = parse_report(&report(&data)).unwrap();
        assert_eq!(report.wavelength_microns(), &[0.35]);
        assert!(report.column(ReportColumn::Depth)[0].is_nan());
    }

    #[test]
    fn empty_data_section_yields_zero_rows() {
        let report = parse_report(&report(&[])).unwrap();
        assert_eq!(report.rows(), 0);
    }

    #[test]
    fn too_few_lines_is_a_malformed_report() {
        let text = (0..10).map(|_| "x").collect::<Vec<_>>().join("\n");

        assert_eq!(
            parse_report(&text).unwrap_err(),
            ModtranError::MalformedReport {
                total_lines: 10,
                required: 12,
                header: 11,
                footer: 1,
            }
        );
    }

    #[test]
    fn labels_follow_the_report_header_vocabulary() {
        assert_eq!(ReportColumn::Wavelength.label(), "WAVELEN MCRN");
        assert_eq!(ReportColumn::SolarAtObserver.label(), "SOL@OBS");
        assert_eq!(ReportColumn::ALL.len(), COLUMN_COUNT);
    }
}
