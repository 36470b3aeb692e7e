//! Parsing of user answers.

use std::str::FromStr;

use pixedit_core::EditError;

/// Entries of the main menu, numbered 1-9.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Brightness,
    Contrast,
    Grayscale,
    Padding,
    Threshold,
    Blend,
    Undo,
    ViewHistory,
    SaveAndExit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 9] = [
        MenuChoice::Brightness,
        MenuChoice::Contrast,
        MenuChoice::Grayscale,
        MenuChoice::Padding,
        MenuChoice::Threshold,
        MenuChoice::Blend,
        MenuChoice::Undo,
        MenuChoice::ViewHistory,
        MenuChoice::SaveAndExit,
    ];

    /// Menu label, without the number.
    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::Brightness => "Adjust Brightness",
            MenuChoice::Contrast => "Adjust Contrast",
            MenuChoice::Grayscale => "Convert to Grayscale",
            MenuChoice::Padding => "Add Padding",
            MenuChoice::Threshold => "Apply Thresholding",
            MenuChoice::Blend => "Blend with Another Image",
            MenuChoice::Undo => "Undo Last Operation",
            MenuChoice::ViewHistory => "View History",
            MenuChoice::SaveAndExit => "Save and Exit",
        }
    }

    /// Position in the menu, starting at 1.
    pub fn number(self) -> usize {
        MenuChoice::ALL
            .iter()
            .position(|&c| c == self)
            .map_or(0, |i| i + 1)
    }
}

impl FromStr for MenuChoice {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed {
            "1" => Ok(MenuChoice::Brightness),
            "2" => Ok(MenuChoice::Contrast),
            "3" => Ok(MenuChoice::Grayscale),
            "4" => Ok(MenuChoice::Padding),
            "5" => Ok(MenuChoice::Threshold),
            "6" => Ok(MenuChoice::Blend),
            "7" => Ok(MenuChoice::Undo),
            "8" => Ok(MenuChoice::ViewHistory),
            "9" => Ok(MenuChoice::SaveAndExit),
            _ => Err(EditError::InvalidMenuChoice(trimmed.to_string())),
        }
    }
}

/// Parse a number typed by the user.
pub fn parse_number<T: FromStr>(input: &str) -> Result<T, EditError> {
    let trimmed = input.trim();
    trimmed.parse().map_err(|_| EditError::MalformedNumber {
        input: trimmed.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_number_accepts_signed_and_float() {
        assert_eq!(parse_number::<i32>("-50").unwrap(), -50);
        assert_eq!(parse_number::<i32>(" 20 \n").unwrap(), 20);
        assert_eq!(parse_number::<f32>("1.5").unwrap(), 1.5);
        assert_eq!(parse_number::<u32>("10").unwrap(), 10);
    }

    #[test]
    fn parse_number_rejects_garbage() {
        match parse_number::<i32>("ten") {
            Err(EditError::MalformedNumber { input }) => assert_eq!(input, "ten"),
            other => panic!("Expected MalformedNumber, got {:?}", other),
        }
        assert!(parse_number::<u32>("-1").is_err());
        assert!(parse_number::<f32>("").is_err());
    }

    #[test]
    fn menu_choices_round_trip_numbers() {
        for (i, choice) in MenuChoice::ALL.iter().enumerate() {
            assert_eq!(choice.number(), i + 1);
            assert_eq!((i + 1).to_string().parse::<MenuChoice>().unwrap(), *choice);
        }
    }

    #[test]
    fn menu_choice_rejects_unknown() {
        for bad in ["0", "10", "", "one", "1.0"] {
            assert!(matches!(
                bad.parse::<MenuChoice>(),
                Err(EditError::InvalidMenuChoice(_))
            ));
        }
    }
}
