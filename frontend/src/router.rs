use leptos::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::*;

use crate::api::EmployeeId;
use crate::pages::attendance::AttendancePage;
use crate::pages::employees::panel::EmployeeDirectoryPage;

pub const HOME_PATH: &str = "/";
pub const ATTENDANCE_PATH: &str = "/attendance";
pub const EMPLOYEES_PATH: &str = "/employees";
pub const EMPLOYEE_ATTENDANCE_PATH: &str = "/employees/:id/attendance";

/// Concrete link for [`EMPLOYEE_ATTENDANCE_PATH`].
pub fn employee_attendance_href(employee: EmployeeId) -> String {
    format!("{}/{}/attendance", EMPLOYEES_PATH, employee)
}

pub fn mount_app() {
    mount_to_body(app_root);
}

pub fn app_root() -> impl IntoView {
    provide_meta_context();
    provide_context(crate::api::ApiClient::new());
    view! {
        <Title text="HRMS Lite" />
        <Router>
            <Routes>
                <Route path=HOME_PATH view=|| view! { <Redirect path=EMPLOYEES_PATH /> } />
                <Route path=ATTENDANCE_PATH view=AttendancePage />
                <Route path=EMPLOYEES_PATH view=EmployeeDirectoryPage />
                <Route path=EMPLOYEE_ATTENDANCE_PATH view=AttendancePage />
            </Routes>
        </Router>
    }
}
