use time::Date;

/// Identifies one per-date fetch. Only the newest ticket may apply its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub date: Date,
    generation: u64,
}

/// The selected date plus a counter that invalidates older fetches.
#[derive(Debug, Clone, Copy)]
pub struct DateSelection {
    selected: Date,
    generation: u64,
}

impl DateSelection {
    pub fn new(date: Date) -> Self {
        Self {
            selected: date,
            generation: 0,
        }
    }

    pub fn selected(&self) -> Date {
        self.selected
    }

    /// Selects `date` and hands out the only ticket that is now current.
    pub fn select(&mut self, date: Date) -> LoadTicket {
        self.selected = date;
        self.generation += 1;
        LoadTicket {
            date,
            generation: self.generation,
        }
    }

    pub fn is_current(&self, ticket: &LoadTicket) -> bool {
        ticket.generation == self.generation && ticket.date == self.selected
    }
}
