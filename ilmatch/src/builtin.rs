//! Catalog locating the download queue functions of the Source engine client.
//!
//! All patterns are compiled by the [pattern!](crate::pattern) macro, hence a malformed
//! variant fails the build instead of silently never matching.

use crate::{
    pattern,
    BorrowedExpressionPattern,
    CatalogError,
    ExpressionPattern,
    SignatureCatalog,
    TargetDescriptor,
};

/// Text referenced by the function all targets are called from.
pub const DEFAULT_ANCHOR: &str = "CheckUpdatingSteamResources";

/// Identical on every platform.
pub static CL_GET_DOWNLOAD_QUEUE_SIZE: [BorrowedExpressionPattern<'static>; 1] = [pattern!(
    "HLIL_IF(HLIL_CMP_E(HLIL_CALL(HLIL_CONST_PTR(??), ()), HLIL_CONST(0)))"
)];

pub static CL_DOWNLOAD_UPDATE: [BorrowedExpressionPattern<'static>; 2] = [
    /* linux */
    pattern!("HLIL_IF(HLIL_AND(HLIL_CMP_NE(HLIL_VAR(..), HLIL_CONST(0)), HLIL_CMP_E(HLIL_CALL(HLIL_CONST_PTR(??), ()), HLIL_CONST(0)))"),
    /* windows */
    pattern!("HLIL_ASSIGN(HLIL_VAR(..), HLIL_CALL(HLIL_CONST_PTR(??), ()))"),
];

pub static CL_QUEUE_DOWNLOAD: [BorrowedExpressionPattern<'static>; 2] = [
    /* linux & windows x64 */
    pattern!("HLIL_CALL(HLIL_CONST_PTR(??), (HLIL_VAR(..), HLIL_VAR(..)))"),
    /* windows x86 */
    pattern!("HLIL_CALL(HLIL_CONST_PTR(??), (HLIL_VAR(..), HLIL_VAR(..), HLIL_VAR(..), HLIL_VAR(..), HLIL_VAR(..)))"),
];

fn target(
    name: &str,
    variants: &'static [BorrowedExpressionPattern<'static>],
) -> Result<TargetDescriptor, CatalogError> {
    let variants = variants
        .iter()
        .map(|variant| Box::new(*variant) as Box<dyn ExpressionPattern>)
        .collect();

    TargetDescriptor::new(name, variants)
}

/// Build the catalog of the download queue functions.
pub fn download_catalog() -> Result<SignatureCatalog, CatalogError> {
    SignatureCatalog::new(vec![
        self::target("CL_GetDownloadQueueSize", &CL_GET_DOWNLOAD_QUEUE_SIZE)?,
        self::target("CL_DownloadUpdate", &CL_DOWNLOAD_UPDATE)?,
        self::target("CL_QueueDownload", &CL_QUEUE_DOWNLOAD)?,
    ])
}

#[cfg(test)]
mod test {
    use super::download_catalog;
    use crate::{
        compiler,
        ExpressionPattern,
    };

    #[test]
    fn test_catalog_layout() {
        let catalog = download_catalog().unwrap();
        let names = catalog
            .targets()
            .iter()
            .map(|target| target.name())
            .collect::<Vec<_>>();
        assert_eq!(
            names,
            ["CL_GetDownloadQueueSize", "CL_DownloadUpdate", "CL_QueueDownload"]
        );
        assert_eq!(catalog.target("CL_DownloadUpdate").unwrap().variants().count(), 2);
    }

    #[test]
    fn test_macro_matches_runtime_compiler() {
        for target in download_catalog().unwrap().targets() {
            for variant in target.variants() {
                let runtime = compiler::compile_pattern(variant.source()).unwrap();
                assert_eq!(variant.atoms(), runtime.atoms());
                assert_eq!(variant.literal_text(), runtime.literal_text());
            }
        }
    }

    #[test]
    fn test_windows_download_update() {
        let corpus = "HLIL_VAR_INIT(HLIL_VAR(var_c), HLIL_CONST(0))\n\
                      HLIL_ASSIGN(HLIL_VAR(eax), HLIL_CALL(HLIL_CONST_PTR(270336), ()))\n\
                      HLIL_IF(HLIL_CMP_E(HLIL_CALL(HLIL_CONST_PTR(274432), ()), HLIL_CONST(0)))";

        let catalog = download_catalog().unwrap();
        let resolutions = catalog.resolve(corpus);

        let captures = resolutions
            .iter()
            .map(|resolution| {
                resolution
                    .result()
                    .map(|result| (result.variant(), result.capture()))
            })
            .collect::<Vec<_>>();
        assert_eq!(captures, [Some((0, "274432")), Some((1, "270336")), None]);
    }
}
