use anchor_lang::prelude::*;

use crate::error::DistributorError;

/// Deserializes a program account that is allowed to be missing.
///
/// Returns `None` when nothing was created at the address yet. An existing
/// account must be owned by this program and carry the right discriminator.
pub fn load_optional_account<T: AccountDeserialize>(info: &AccountInfo) -> Result<Option<T>> {
    if info.data_is_empty() {
        return Ok(None);
    }

    require!(
        info.owner == &crate::ID,
        DistributorError::AccountNotOwnedByProgram
    );

    let data = info.try_borrow_data()?;
    let account = T::try_deserialize(&mut &data[..])?;

    Ok(Some(account))
}
