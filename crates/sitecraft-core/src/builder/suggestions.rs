/// One-click improvement requests offered after a site has been generated.
pub const QUICK_IMPROVEMENTS: &[&str] = &[
    "Make it more colorful and vibrant",
    "Improve mobile responsiveness",
    "Add loading animations",
    "Add dark mode toggle",
    "Add hover effects and transitions",
    "Add a contact form",
    "Add testimonials section",
    "Add image carousel",
];
