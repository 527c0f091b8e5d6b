use tatami_data::{EntryKind, Expense, LedgerEntry, Member, METHOD_NA};
use tatami_ledger::{datetime, DashboardStats, LedgerReport};

macro_rules! next_attr {
    ($old:ident, $new:ident) => {
        if $old != $new {
            format!(" -> {}", $new)
        } else {
            "".to_string()
        }
    };
    ($old:ident, $new:ident, $attr:ident) => {
        if $old.$attr != $new.$attr {
            format!(" -> {}", $new.$attr)
        } else {
            "".to_string()
        }
    };
}

pub trait PrintFormatted {
    fn print_formatted(&self);
}

impl PrintFormatted for Member {
    fn print_formatted(&self) {
        let membership_end = match self.membership_end {
            Some(end) => end.to_string(),
            None => "None".to_string(),
        };

        println!("Name:\t\t\t{}", self.full_name());
        println!("Email:\t\t\t{}", self.email);
        println!("Phone:\t\t\t{}", self.phone);
        println!("Activity:\t\t{}", self.activity);
        println!("Start:\t\t\t{}", self.membership_start);
        println!("End:\t\t\t{}", membership_end);
    }
}

impl PrintFormatted for (Member, Member) {
    fn print_formatted(&self) {
        let (old, new) = self;
        let membership_end_old = match old.membership_end {
            Some(end) => end.to_string(),
            None => "None".to_string(),
        };
        let membership_end_new = match new.membership_end {
            Some(end) => end.to_string(),
            None => "None".to_string(),
        };
        let name_old = old.full_name();
        let name_new = new.full_name();

        let next_name = next_attr!(name_old, name_new);
        println!("Name:\t\t\t{}{}", name_old, next_name);
        let next_email = next_attr!(old, new, email);
        println!("Email:\t\t\t{}{}", old.email, next_email);
        let next_phone = next_attr!(old, new, phone);
        println!("Phone:\t\t\t{}{}", old.phone, next_phone);
        let next_activity = next_attr!(old, new, activity);
        println!("Activity:\t\t{}{}", old.activity, next_activity);
        let next_membership_start = next_attr!(old, new, membership_start);
        println!(
            "Start:\t\t\t{}{}",
            old.membership_start, next_membership_start
        );
        let next_membership_end =
            next_attr!(membership_end_old, membership_end_new);
        println!("End:\t\t\t{}{}", membership_end_old, next_membership_end);
    }
}

impl PrintFormatted for Vec<Member> {
    fn print_formatted(&self) {
        let today = datetime::today();
        println!(
            "{:>4}\t{:<24}\t{:<30}\t{:<16}\t{:<12}\t{}\t{}",
            "ID", "Name", "Email", "Phone", "Activity", "Start", "Inactive"
        );
        println!("{:-<120}", "-");

        for member in self {
            let inactive = if member.is_active(today) { "" } else { "*" };
            println!(
                "{:>4}\t{:<24}\t{:<30}\t{:<16}\t{:<12}\t{}\t{}",
                member.id,
                member.full_name(),
                member.email,
                member.phone,
                member.activity,
                member.membership_start,
                inactive
            );
        }
    }
}

impl PrintFormatted for Vec<Expense> {
    fn print_formatted(&self) {
        println!(
            "{:>4}\t{:<15}\t{:<16}\t{:<40}\t{:>10}\t{}",
            "ID", "Date", "Category", "Description", "Amount", "Status"
        );
        println!("{:-<120}", "-");
        for expense in self {
            println!(
                "{:>4}\t{:<15}\t{:<16}\t{:<40}\t{:>10.2}\t{}",
                expense.id,
                expense.date.to_string(),
                expense.category,
                expense.description,
                expense.amount,
                expense.status
            );
        }
    }
}

impl PrintFormatted for LedgerEntry {
    fn print_formatted(&self) {
        let kind = match self.kind {
            EntryKind::Credit => "credit",
            EntryKind::Debit => "debit",
        };
        let method = self.method.as_deref().unwrap_or(METHOD_NA);
        println!(
            "{:>4}\t{:<15}\t{:<8}\t{:<30}\t{:<16}\t{:>10.2}\t{:<10}\t{}",
            self.id,
            self.date.to_string(),
            kind,
            self.description,
            self.category,
            self.amount,
            method,
            self.status
        );
    }
}

impl PrintFormatted for LedgerReport {
    fn print_formatted(&self) {
        println!("{} entries.", self.transactions.len());
        println!(
            "{:>4}\t{:<15}\t{:<8}\t{:<30}\t{:<16}\t{:>10}\t{:<10}\t{}",
            "ID", "Date", "Type", "Description", "Category", "Amount", "Method", "Status"
        );
        println!("{:-<140}", "-");
        for entry in &self.transactions {
            entry.print_formatted();
        }
        println!("{:-<140}", "-");
        println!("Revenue:\t{:>10.2}", self.summary.total_revenue);
        println!("Expenses:\t{:>10.2}", self.summary.total_expenses);
        println!("Net income:\t{:>10.2}", self.summary.net_income);
    }
}

impl PrintFormatted for DashboardStats {
    fn print_formatted(&self) {
        println!("Month:\t\t\t{}", self.month);
        println!(
            "Members:\t\t{} ({} active)",
            self.member_count, self.active_members
        );
        println!("Revenue:\t\t{:.2}", self.monthly_revenue);
        println!("Expenses:\t\t{:.2}", self.monthly_expenses);
        println!("Net income:\t\t{:.2}", self.net_income);
        println!("Pending payments:\t{}", self.pending_payments);
        for total in &self.method_totals {
            println!("  {:<12}\t{:>10.2}", total.method, total.total);
        }
    }
}
