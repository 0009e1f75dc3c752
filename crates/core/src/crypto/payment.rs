//! Per-field encryption of stored payment cards.

use common::{EncryptedPaymentCard, PaymentCard, PaymentCardSummary};

use super::cipher::{decrypt_field, encrypt_field, CipherError};

/// Encrypt every sensitive field of `card` independently.
///
/// # Errors
///
/// Propagates the first [`CipherError`] from [`encrypt_field`].
pub fn encrypt_payment_card(
    card: &PaymentCard,
    secret_material: &str,
) -> Result<EncryptedPaymentCard, CipherError> {
    Ok(EncryptedPaymentCard {
        cardholder_name: encrypt_field(&card.cardholder_name, secret_material)?,
        card_number: encrypt_field(&card.card_number, secret_material)?,
        exp_month: encrypt_field(&card.exp_month, secret_material)?,
        exp_year: encrypt_field(&card.exp_year, secret_material)?,
        cvv: encrypt_field(&card.cvv, secret_material)?,
    })
}

/// Decrypt the display fields of a stored card.
///
/// The CVV is left encrypted, and the card number is reduced to its last
/// four characters before it leaves this function.
///
/// # Errors
///
/// Propagates the first [`CipherError`] from [`decrypt_field`].
pub fn summarize_payment_card(
    card: &EncryptedPaymentCard,
    secret_material: &str,
) -> Result<PaymentCardSummary, CipherError> {
    let number = decrypt_field(&card.card_number, secret_material)?;
    Ok(PaymentCardSummary {
        cardholder_name: decrypt_field(&card.cardholder_name, secret_material)?,
        last4: last_four(&number),
        exp_month: decrypt_field(&card.exp_month, secret_material)?,
        exp_year: decrypt_field(&card.exp_year, secret_material)?,
    })
}

fn last_four(number: &str) -> String {
    let chars: Vec<char> = number.chars().collect();
    chars[chars.len().saturating_sub(4)..].iter().collect()
}
