use chrono::NaiveDate;

/// Format a value as Brazilian currency: "R$ 1.234,56".
pub fn format_brl(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as i64;
    let reais = cents / 100;
    let centavos = cents % 100;

    let digits = reais.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{}R$ {},{:02}", sign, grouped, centavos)
}

/// Format a date as "dd/mm/aaaa".
pub fn format_data(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}
