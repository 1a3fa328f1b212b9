//! Static page footer

use chrono::Datelike;

const QUICK_LINKS: [(&str, &str); 4] = [
    ("Home", "/"),
    ("Book Catalog", "/books"),
    ("Login", "/login"),
    ("Register", "/register"),
];

const CONTACT: [&str; 3] = [
    "Email: library@example.com",
    "Phone: (65) 123-4567",
    "Address: 123 Library St, Book City",
];

const HOURS: [&str; 3] = [
    "Monday - Friday: 9:00 AM - 8:00 PM",
    "Saturday: 10:00 AM - 6:00 PM",
    "Sunday: 12:00 PM - 5:00 PM",
];

pub fn render(year: i32) -> String {
    let mut out = String::from("Library Management\nYour digital gateway to knowledge and learning.\n\nQuick Links\n");
    for (label, path) in QUICK_LINKS {
        out.push_str(&format!("  {} ({})\n", label, path));
    }
    out.push_str("\nContact Info\n");
    for line in CONTACT {
        out.push_str(&format!("  {}\n", line));
    }
    out.push_str("\nLibrary Hours\n");
    for line in HOURS {
        out.push_str(&format!("  {}\n", line));
    }
    out.push_str(&format!("\n(c) {} Library Management System. All rights reserved.\n", year));
    out
}

/// Footer stamped with the current year
pub fn current() -> String {
    render(chrono::Local::now().year())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_footer_contains_year_and_hours() {
        let text = render(2030);
        assert!(text.contains("(c) 2030 Library Management System"));
        assert!(text.contains("Saturday: 10:00 AM - 6:00 PM"));
        assert!(text.contains("Book Catalog (/books)"));
    }
}
