//! Property tests for payroll arithmetic and export rendering.

use payroll_ledger::calculation::{
    build_department_report, calculate_payroll, calculate_summary_stats, round_money,
};
use payroll_ledger::export::render_csv;
use payroll_ledger::models::{Department, Employee, EmployeeDraft, MAX_AMOUNT, MAX_TAX_RATE};
use proptest::prelude::*;
use proptest::test_runner::Config;
use rust_decimal::Decimal;

const DEPARTMENTS: [&str; 3] = ["Engineering", "Marketing", "Finance"];

fn money() -> impl Strategy<Value = Decimal> {
    (0_i64..100_000_000, 0_u32..=3).prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale))
}

fn rate() -> impl Strategy<Value = Decimal> {
    (0_i64..=150).prop_map(|points| Decimal::new(points, 2))
}

fn employee() -> impl Strategy<Value = Employee> {
    (
        "[A-Za-z ,\"]{1,20}",
        proptest::option::of(0_usize..DEPARTMENTS.len()),
        money(),
        rate(),
        money(),
    )
        .prop_map(|(name, department, salary, tax_rate, allowances)| Employee {
            id: 0,
            name,
            position: "Staff".to_string(),
            department: department.map(|i| DEPARTMENTS[i].to_string()),
            salary,
            tax_rate,
            allowances,
        })
}

fn employees() -> impl Strategy<Value = Vec<Employee>> {
    proptest::collection::vec(employee(), 0..24).prop_map(|mut employees| {
        for (i, employee) in employees.iter_mut().enumerate() {
            employee.id = i as i64 + 1;
        }
        employees
    })
}

fn bounded_draft_employees() -> impl Strategy<Value = Vec<Employee>> {
    let amount = (0_i64..=1_000_000_000_000_000, 0_u32..=4)
        .prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale));
    let rate = (-10_000_i64..=10_000).prop_map(|points| Decimal::new(points, 2));
    proptest::collection::vec((amount.clone(), rate, amount), 0..64).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (salary, tax_rate, allowances))| {
                EmployeeDraft::new("Staff", "Staff", None, salary, tax_rate, allowances)
                    .unwrap()
                    .into_employee(i as i64 + 1)
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(Config::with_cases(128))]

    #[test]
    fn pay_line_satisfies_net_pay_identity(employees in employees()) {
        let run = calculate_payroll(&employees).unwrap();
        for (employee, line) in employees.iter().zip(&run.lines) {
            prop_assert_eq!(line.employee_id, employee.id);
            prop_assert_eq!(line.gross_pay, employee.salary);
            prop_assert_eq!(line.tax_amount, employee.salary * employee.tax_rate);
            prop_assert_eq!(line.net_pay, line.gross_pay - line.tax_amount + line.allowances);
        }
    }

    #[test]
    fn summary_is_sum_of_lines_in_any_order(employees in employees()) {
        let run = calculate_payroll(&employees).unwrap();
        let gross: Decimal = run.lines.iter().map(|l| l.gross_pay).sum();
        let tax: Decimal = run.lines.iter().map(|l| l.tax_amount).sum();
        let net: Decimal = run.lines.iter().map(|l| l.net_pay).sum();
        prop_assert_eq!(run.summary.total_gross, gross);
        prop_assert_eq!(run.summary.total_tax, tax);
        prop_assert_eq!(run.summary.total_net, net);

        let reversed: Vec<Employee> = employees.iter().rev().cloned().collect();
        prop_assert_eq!(calculate_payroll(&reversed).unwrap().summary, run.summary);
    }

    #[test]
    fn department_report_counts_only_assigned_employees(employees in employees()) {
        let departments: Vec<Department> = DEPARTMENTS
            .iter()
            .enumerate()
            .map(|(i, name)| Department { id: i as i64 + 1, name: name.to_string() })
            .collect();
        let report = build_department_report(&departments, &employees).unwrap();

        let assigned = employees.iter().filter(|e| e.department.is_some()).count() as u64;
        prop_assert_eq!(report.iter().map(|entry| entry.count).sum::<u64>(), assigned);
        for entry in &report {
            prop_assert!(entry.count > 0);
            prop_assert!(entry.min_salary <= entry.max_salary);
        }
    }

    #[test]
    fn summary_stats_round_exact_total(employees in employees()) {
        let stats = calculate_summary_stats(&employees).unwrap();
        let total: Decimal = employees.iter().map(|e| e.salary).sum();
        prop_assert_eq!(stats.employee_count, employees.len() as u64);
        prop_assert_eq!(stats.total_salary, round_money(total));
    }

    #[test]
    fn csv_has_one_record_per_line(employees in employees()) {
        let run = calculate_payroll(&employees).unwrap();
        let csv = render_csv(&run.lines);
        prop_assert_eq!(csv.matches("\r\n").count(), run.lines.len() + 1);
        prop_assert!(csv.ends_with("\r\n"));
    }

    #[test]
    fn validated_employees_never_overflow(employees in bounded_draft_employees()) {
        for employee in &employees {
            prop_assert!(employee.salary <= MAX_AMOUNT);
            prop_assert!(employee.tax_rate.abs() <= MAX_TAX_RATE);
        }
        prop_assert!(calculate_payroll(&employees).is_ok());
        prop_assert!(calculate_summary_stats(&employees).is_ok());
    }
}
