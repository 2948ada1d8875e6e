/// UI layer: panels and the two report widgets (summary table, bar chart).
pub mod chart;
pub mod panels;
pub mod table;
