use owo_colors::OwoColorize;
use tabled::{settings::Style, Table, Tabled};
use crate::query::{MarksBand, RosterStats};
use crate::student::StudentRecord;
use crate::ui::theme;

#[derive(Tabled)]
pub struct TableRow {
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

#[derive(Tabled)]
pub struct StudentRow {
    #[tabled(rename = "Roll")]
    pub roll: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Age")]
    pub age: String,
    #[tabled(rename = "Branch")]
    pub branch: String,
    #[tabled(rename = "Marks")]
    pub marks: String,
}

impl From<&StudentRecord> for StudentRow {
    fn from(student: &StudentRecord) -> Self {
        Self {
            roll: student.roll.clone(),
            name: student.name.clone(),
            age: student.age.clone(),
            branch: student.branch.clone(),
            marks: marks_cell(&student.marks),
        }
    }
}

/// Marks as a percentage, coloured by band
pub fn marks_cell(marks: &str) -> String {
    let band = MarksBand::of(marks);
    format!("{}%", marks).style(theme().marks(band)).to_string()
}

pub struct TableBuilder {
    rows: Vec<TableRow>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn add_row(&mut self, label: &str, value: &str) {
        self.rows.push(TableRow {
            metric: label.to_string(),
            value: value.to_string(),
        });
    }

    pub fn build(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }

        Table::new(&self.rows).with(Style::rounded()).to_string()
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn student_table(students: &[StudentRecord]) -> String {
    if students.is_empty() {
        return String::new();
    }

    let rows: Vec<StudentRow> = students.iter().map(StudentRow::from).collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

pub fn stats_table(stats: &RosterStats) -> String {
    let mut builder = TableBuilder::new();
    builder.add_row("Total students", &stats.total.to_string());
    builder.add_row("Average marks", &format!("{}%", stats.average_marks));
    builder.add_row("Top marks", &format!("{}%", stats.top_marks));
    builder.add_row("Branches", &stats.distinct_branches.to_string());
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_table_lists_every_roll() {
        let students = vec![
            StudentRecord::new("A1", "Meera", "20", "CS", "80"),
            StudentRecord::new("A2", "Kabir", "21", "EE", "60"),
        ];

        let table = student_table(&students);
        assert!(table.contains("Roll"));
        assert!(table.contains("A1"));
        assert!(table.contains("Kabir"));
        assert!(table.contains("60%"));
    }

    #[test]
    fn test_empty_tables() {
        assert!(student_table(&[]).is_empty());
        assert!(TableBuilder::new().build().is_empty());
        assert!(stats_table(&RosterStats::default()).contains("Average marks"));
    }
}
