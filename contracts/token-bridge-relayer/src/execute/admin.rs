//! Ownership transfer handlers (submit/confirm/cancel).

use cosmwasm_std::{DepsMut, MessageInfo, Response};

use crate::error::ContractError;
use crate::state::{CONFIG, PENDING_OWNER};

/// Propose a new owner. Takes effect once the candidate confirms.
pub fn execute_submit_ownership_transfer(
    deps: DepsMut,
    info: MessageInfo,
    new_owner: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized);
    }

    let new_owner_addr = deps.api.addr_validate(&new_owner)?;
    PENDING_OWNER.save(deps.storage, &new_owner_addr)?;

    Ok(Response::new()
        .add_attribute("method", "submit_ownership_transfer")
        .add_attribute("pending_owner", new_owner_addr))
}

/// Accept a pending ownership transfer.
pub fn execute_confirm_ownership_transfer(
    deps: DepsMut,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let pending = PENDING_OWNER
        .may_load(deps.storage)?
        .ok_or(ContractError::NoPendingOwner)?;

    if info.sender != pending {
        return Err(ContractError::NotPendingOwner);
    }

    let mut config = CONFIG.load(deps.storage)?;
    let previous_owner = std::mem::replace(&mut config.owner, pending);
    CONFIG.save(deps.storage, &config)?;
    PENDING_OWNER.remove(deps.storage);

    Ok(Response::new()
        .add_attribute("method", "confirm_ownership_transfer")
        .add_attribute("previous_owner", previous_owner)
        .add_attribute("new_owner", config.owner))
}

pub fn execute_cancel_ownership_transfer(
    deps: DepsMut,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized);
    }

    PENDING_OWNER.remove(deps.storage);

    Ok(Response::new().add_attribute("method", "cancel_ownership_transfer"))
}
