use exocat_domain::OutOfRange;
use exocat_loader::LoadError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	OutOfRange(#[from] OutOfRange),
	#[error(transparent)]
	Load(#[from] LoadError),
	#[error(transparent)]
	Loader(#[from] exocat_loader::Error),
}
