pub mod analytics;
pub mod chart;
pub mod durations;
pub mod pages;
pub mod rows;
pub mod table;

#[cfg(test)]
mod tests {
    #[test]
    fn test_module_structure() {
        // Test that all route module constants are accessible
        assert_eq!(super::table::TABLE_PATH, "/table");
        assert_eq!(super::analytics::ANALYTICS_PATH, "/analytics");
        assert_eq!(super::durations::DURATIONS_PATH, "/durations");
        assert_eq!(super::rows::ROWS_PATH, "/rows");
    }
}
