use ratatui::style::Color;

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
    pub number: Color,
    pub edge: Color,
    // Element states
    pub normal: Color,
    pub comparing: Color,
    pub swapping: Color,
    pub sorted: Color,
    pub visited: Color,
    pub exploring: Color,
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),   // Blue
    secondary: Color::Rgb(250, 179, 135), // Orange
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),  // Grey border for normal
    current_line_bg: Color::Rgb(50, 50, 70),   // Slightly lighter BG for the status bar
    number: Color::Rgb(250, 179, 135),         // Orange for numbers
    edge: Color::Rgb(88, 91, 112),
    normal: Color::Rgb(147, 153, 178),     // Grey
    comparing: Color::Rgb(249, 226, 175),  // Yellow
    swapping: Color::Rgb(243, 139, 168),   // Red
    sorted: Color::Rgb(166, 227, 161),     // Green
    visited: Color::Rgb(166, 227, 161),    // Green
    exploring: Color::Rgb(137, 180, 250),  // Blue
};

impl Theme {
    /// Color of one array bar. Swapping beats comparing beats sorted.
    pub fn bar_color(&self, swapping: bool, comparing: bool, sorted: bool) -> Color {
        if swapping {
            self.swapping
        } else if comparing {
            self.comparing
        } else if sorted {
            self.sorted
        } else {
            self.normal
        }
    }

    /// Color of one tree node or graph vertex
    pub fn node_color(&self, visited: bool, exploring: bool) -> Color {
        if visited {
            self.visited
        } else if exploring {
            self.exploring
        } else {
            self.normal
        }
    }
}
