//! Argument parsing for item commands: `<item words> [quantity]`.

use crate::outcome::ChatError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemArgs {
    pub name: String,
    pub quantity: u32,
}

/// `Milk` → (Milk, 1), `Egg Salad 3` → (Egg Salad, 3).
///
/// A trailing integer only counts as a quantity when at least one name word
/// precedes it. A quantity below 1 is rejected.
pub fn item_with_optional_quantity(args: &str) -> Result<ItemArgs, ChatError> {
    let tokens: Vec<&str> = args.split_whitespace().collect();
    let Some((last, rest)) = tokens.split_last() else {
        return Err(ChatError::EmptyMessage);
    };

    if !rest.is_empty() {
        if let Ok(value) = last.parse::<i64>() {
            let quantity = u32::try_from(value)
                .ok()
                .filter(|q| *q >= 1)
                .ok_or_else(|| ChatError::InvalidQuantity((*last).to_string()))?;
            return Ok(ItemArgs {
                name: rest.join(" "),
                quantity,
            });
        }
    }

    Ok(ItemArgs {
        name: tokens.join(" "),
        quantity: 1,
    })
}

/// `Beans 10` → (Beans, 10). The trailing quantity is mandatory and may be zero.
pub fn item_with_required_quantity(args: &str) -> Result<ItemArgs, ChatError> {
    let tokens: Vec<&str> = args.split_whitespace().collect();
    let Some((last, rest)) = tokens.split_last() else {
        return Err(ChatError::InvalidQuantity(String::new()));
    };
    if rest.is_empty() {
        return Err(ChatError::InvalidQuantity(String::new()));
    }

    let quantity = last
        .parse::<u32>()
        .map_err(|_| ChatError::InvalidQuantity((*last).to_string()))?;
    Ok(ItemArgs {
        name: rest.join(" "),
        quantity,
    })
}
