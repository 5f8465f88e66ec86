#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderField {
    EmpId,
    FullName,
    Email,
    Department,
}

impl OrderField {
    pub const ALL: [OrderField; 4] = [
        OrderField::EmpId,
        OrderField::FullName,
        OrderField::Email,
        OrderField::Department,
    ];

    /// Name accepted by the `ordering` query parameter.
    pub fn api_name(self) -> &'static str {
        match self {
            OrderField::EmpId => "emp_id",
            OrderField::FullName => "full_name",
            OrderField::Email => "email",
            OrderField::Department => "department__name",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OrderField::EmpId => "Employee ID",
            OrderField::FullName => "Full Name",
            OrderField::Email => "Email",
            OrderField::Department => "Department",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryQuery {
    pub search: String,
    pub order: Option<(OrderField, SortDirection)>,
}

impl DirectoryQuery {
    /// Clicking the active column flips its direction; any other column
    /// becomes active in ascending order.
    pub fn toggle_sort(&mut self, field: OrderField) {
        self.order = match self.order {
            Some((active, direction)) if active == field => Some((field, direction.flipped())),
            _ => Some((field, SortDirection::Ascending)),
        };
    }

    pub fn ordering(&self) -> Option<String> {
        self.order.map(|(field, direction)| match direction {
            SortDirection::Ascending => field.api_name().to_string(),
            SortDirection::Descending => format!("-{}", field.api_name()),
        })
    }

    pub fn direction_of(&self, field: OrderField) -> Option<SortDirection> {
        self.order
            .filter(|(active, _)| *active == field)
            .map(|(_, direction)| direction)
    }
}
