pub mod display;
pub mod extract;
pub mod filter;
pub mod presentation;
pub mod report;
pub mod repository;
pub mod session;
pub mod task;
pub(crate) mod task_validation;
pub mod workbook;

pub use extract::{
    AttendanceTable, DailySummary, ExcelRow, ExtractError, LayoutError, SheetLayout, attendance,
    summarize,
};
pub use filter::{TaskFilter, filter_tasks};
pub use presentation::{PresentationState, Section};
pub use report::{ReportError, save_attendance_csv, save_summary_csv, save_summary_json};
pub use repository::TaskRepository;
pub use session::DailyCleaning;
pub use task::{CleanStatus, CleaningType, Task, TaskId, TaskRowClass};
pub use task_validation::TaskError;
pub use workbook::{CellValue, SheetGrid, WorkbookError, load_workbook};
