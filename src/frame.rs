use indexmap::IndexMap;

use crate::{error::Result, value::Value};

/// Column-oriented export of a model list, for handing records to analytics tooling.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    columns: IndexMap<String, Vec<Value>>,
    height: usize,
}

impl Frame {
    /// Builds a frame from rows; columns not present in a row are filled with null.
    pub fn from_rows<'a, I>(column_names: &[String], rows: I) -> Self
    where
        I: IntoIterator<Item = Vec<(&'a str, &'a Value)>>,
    {
        let mut columns: IndexMap<String, Vec<Value>> = column_names
            .iter()
            .map(|name| (name.clone(), Vec::new()))
            .collect();
        let mut height = 0usize;
        for row in rows {
            for (name, value) in row {
                if let Some(column) = columns.get_mut(name) {
                    column.push(value.clone());
                }
            }
            height += 1;
            for column in columns.values_mut() {
                column.resize(height, Value::Null);
            }
        }
        Self { columns, height }
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.keys().map(String::as_str).collect()
    }

    pub fn column(&self, name: &str) -> Option<&[Value]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn row(&self, index: usize) -> Option<Vec<&Value>> {
        (index < self.height).then(|| self.columns.values().map(|c| &c[index]).collect())
    }

    /// Renders the frame as CSV with a header row; nulls become empty fields.
    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());
        writer.write_record(self.columns.keys())?;
        for index in 0..self.height {
            writer.write_record(self.columns.values().map(|c| c[index].as_display()))?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|err| csv::Error::from(err.into_error()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Frame {
        let host_a = Value::from("a");
        let host_b = Value::from("b");
        let vlan = Value::Integer(10);
        Frame::from_rows(
            &["hostname".to_string(), "vlan".to_string()],
            vec![
                vec![("hostname", &host_a), ("vlan", &vlan)],
                vec![("hostname", &host_b)],
            ],
        )
    }

    #[test]
    fn missing_cells_are_null() {
        let frame = sample();
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.width(), 2);
        assert_eq!(
            frame.column("vlan").unwrap(),
            &[Value::Integer(10), Value::Null]
        );
        assert_eq!(frame.row(1).unwrap(), vec![&Value::from("b"), &Value::Null]);
        assert!(frame.row(2).is_none());
    }

    #[test]
    fn to_csv_writes_header_and_rows() {
        assert_eq!(sample().to_csv().unwrap(), "hostname,vlan\na,10\nb,\n");
    }
}
