use crate::config::Validate;
use super::symbols::{EMPTY_CELL_SYMBOL, SYMBOL_PALETTE, SymbolPair};

fn validate_symbol(label: &str, symbol: &str) -> Result<(), String> {
    if symbol.trim().is_empty() {
        return Err(format!("{} symbol must not be blank", label));
    }
    if symbol == EMPTY_CELL_SYMBOL {
        return Err(format!("{} symbol must differ from the empty cell marker", label));
    }
    if !SYMBOL_PALETTE.contains(&symbol) {
        return Err(format!(
            "{} symbol '{}' is not one of {}",
            label,
            symbol,
            SYMBOL_PALETTE.join(" ")
        ));
    }
    Ok(())
}

impl Validate for SymbolPair {
    fn validate(&self) -> Result<(), String> {
        validate_symbol("Player 1", &self.player1)?;
        validate_symbol("Player 2", &self.player2)?;
        if self.player1 == self.player2 {
            return Err(format!(
                "Players must use different symbols, both chose '{}'",
                self.player1
            ));
        }
        Ok(())
    }
}
