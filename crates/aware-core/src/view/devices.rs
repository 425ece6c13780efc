//! Device list view: column selection, plain output and table data.

use std::io::{self, Write};

use unicode_width::UnicodeWidthStr;

use crate::model::Device;
use crate::table::{Column, Row, TableData};

pub const FIELD_UID: &str = "UID";
pub const FIELD_DISPLAY_NAME: &str = "DISPLAY NAME";
pub const FIELD_TYPE: &str = "TYPE";
pub const FIELD_DESCRIPTION: &str = "DESCRIPTION";
pub const FIELD_PARENT: &str = "PARENT";
pub const FIELD_ENABLED: &str = "ENABLED";

/// Every column a device list can show, in default order.
pub const DEVICE_COLUMNS: [&str; 6] = [
    FIELD_UID,
    FIELD_DISPLAY_NAME,
    FIELD_TYPE,
    FIELD_DESCRIPTION,
    FIELD_PARENT,
    FIELD_ENABLED,
];

/// Plain output shows this many columns unless told otherwise.
const TRUNCATED_COLUMNS: usize = 4;

/// Tab stop of plain output.
const TAB_WIDTH: usize = 8;

/// How a device list is presented.
#[derive(Debug, Clone, Default)]
pub struct DisplayFormat {
    pub plain: bool,
    pub no_headers: bool,
    /// Requested columns, any case. Empty selects the defaults.
    pub columns: Vec<String>,
    pub no_truncate: bool,
}

#[derive(Debug, Clone, Default)]
pub struct DeviceList {
    pub devices: Vec<Device>,
    pub display: DisplayFormat,
}

impl DeviceList {
    pub fn new(devices: Vec<Device>, display: DisplayFormat) -> Self {
        Self { devices, display }
    }

    /// Resolves the column set.
    ///
    /// Requested names are matched case-insensitively and unknown ones are
    /// dropped. UID is always present so rows stay addressable.
    pub fn headers(&self) -> Vec<&'static str> {
        if self.display.columns.is_empty() {
            if self.display.no_truncate || !self.display.plain {
                return DEVICE_COLUMNS.to_vec();
            }
            return DEVICE_COLUMNS[..TRUNCATED_COLUMNS].to_vec();
        }

        let mut headers: Vec<&'static str> = self
            .display
            .columns
            .iter()
            .filter_map(|c| {
                let upper = c.trim().to_uppercase();
                DEVICE_COLUMNS.iter().copied().find(|f| *f == upper)
            })
            .collect();
        if !headers.contains(&FIELD_UID) {
            headers.insert(0, FIELD_UID);
        }
        headers
    }

    fn cell(field: &str, device: &Device) -> String {
        match field {
            FIELD_UID => device.id.clone(),
            FIELD_DISPLAY_NAME => device.display_name.clone(),
            FIELD_TYPE => device.device_type.name.clone(),
            FIELD_DESCRIPTION => device.device_type.description.clone(),
            FIELD_PARENT => device.parent_entity.hierarchy_name(),
            FIELD_ENABLED => device.is_enabled.to_string(),
            _ => String::new(),
        }
    }

    pub fn rows(&self) -> Vec<Row> {
        let headers = self.headers();
        self.devices
            .iter()
            .map(|d| headers.iter().map(|h| Self::cell(h, d)).collect())
            .collect()
    }

    /// Columns and rows for the interactive table.
    pub fn table_data(&self) -> TableData {
        TableData {
            columns: self.headers().into_iter().map(Column::new).collect(),
            rows: self.rows(),
        }
    }

    /// Writes tab-aligned lines, with a header line unless disabled.
    ///
    /// Every column but the last is padded with tabs to the first tab stop
    /// past its widest cell, so columns line up on a terminal.
    pub fn render_plain<W: Write>(&self, w: &mut W) -> io::Result<()> {
        let mut lines: Vec<Row> = Vec::new();
        if !self.display.no_headers {
            lines.push(self.headers().into_iter().map(String::from).collect());
        }
        lines.extend(self.rows());
        for line in align_tabs(&lines) {
            writeln!(w, "{}", line)?;
        }
        w.flush()
    }
}

fn align_tabs(lines: &[Row]) -> Vec<String> {
    let columns = lines.iter().map(Vec::len).max().unwrap_or(0);
    let stops: Vec<usize> = (0..columns.saturating_sub(1))
        .map(|i| {
            let widest = lines
                .iter()
                .filter_map(|line| line.get(i))
                .map(|cell| cell.width())
                .max()
                .unwrap_or(0);
            (widest + 1).div_ceil(TAB_WIDTH) * TAB_WIDTH
        })
        .collect();

    lines
        .iter()
        .map(|line| {
            let mut out = String::new();
            for (i, cell) in line.iter().enumerate() {
                out.push_str(cell);
                if let Some(&stop) = stops.get(i)
                    && i + 1 < line.len()
                {
                    let tabs = (stop - cell.width()).div_ceil(TAB_WIDTH);
                    out.extend(std::iter::repeat_n('\t', tabs));
                }
            }
            out
        })
        .collect()
}
