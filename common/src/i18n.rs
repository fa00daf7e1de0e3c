//! Localized UI strings
//!
//! French and English tables behind a closed key set. French is the
//! default language.

use crate::settings::Language;

/// Every user-facing string the UI looks up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKey {
    WindowTitle,

    OptionsTitle,
    OptionsLanguage,
    OptionsTheme,
    OptionsImportMode,
    OptionsImportReplace,
    OptionsImportAdd,
    OptionsThemeDark,
    OptionsThemeLight,
    OptionsClose,

    BtnOptions,
    BtnSelectFolder,
    BtnClear,
    BtnExport,
    BtnImport,

    DropZoneText,
    SliderLabel,

    FullscreenCompare,

    DialogSelectFolder,
    DialogExportTitle,
    DialogImportTitle,

    MsgNoImages,
    MsgExported,
    MsgImported,
    MsgCleared,
}

impl Language {
    pub fn text(self, key: TextKey) -> &'static str {
        match self {
            Language::En => en(key),
            Language::Fr => fr(key),
        }
    }
}

fn en(key: TextKey) -> &'static str {
    match key {
        TextKey::WindowTitle => "Checkpoints Gallery",

        TextKey::OptionsTitle => "Options",
        TextKey::OptionsLanguage => "Language",
        TextKey::OptionsTheme => "Theme",
        TextKey::OptionsImportMode => "Grid import mode",
        TextKey::OptionsImportReplace => "Replace",
        TextKey::OptionsImportAdd => "Add",
        TextKey::OptionsThemeDark => "Dark",
        TextKey::OptionsThemeLight => "Light",
        TextKey::OptionsClose => "Close",

        TextKey::BtnOptions => "⚙️ Options",
        TextKey::BtnSelectFolder => "Checkpoints Folder",
        TextKey::BtnClear => "Clear",
        TextKey::BtnExport => "Export",
        TextKey::BtnImport => "Import",

        TextKey::DropZoneText => "Drag and drop images here or click to select",
        TextKey::SliderLabel => "Image Size",

        TextKey::FullscreenCompare => "Compare with grid:",

        TextKey::DialogSelectFolder => "Select Checkpoints Folder",
        TextKey::DialogExportTitle => "Export Results",
        TextKey::DialogImportTitle => "Import Grid",

        TextKey::MsgNoImages => "No images to export",
        TextKey::MsgExported => "Results exported successfully",
        TextKey::MsgImported => "Grid imported",
        TextKey::MsgCleared => "Grid cleared",
    }
}

fn fr(key: TextKey) -> &'static str {
    match key {
        TextKey::WindowTitle => "Galerie de Checkpoints",

        TextKey::OptionsTitle => "Options",
        TextKey::OptionsLanguage => "Langue",
        TextKey::OptionsTheme => "Thème",
        TextKey::OptionsImportMode => "Mode d'import de grille",
        TextKey::OptionsImportReplace => "Remplacer",
        TextKey::OptionsImportAdd => "Ajouter",
        TextKey::OptionsThemeDark => "Sombre",
        TextKey::OptionsThemeLight => "Clair",
        TextKey::OptionsClose => "Fermer",

        TextKey::BtnOptions => "⚙️ Options",
        TextKey::BtnSelectFolder => "Checkpoints Folder",
        TextKey::BtnClear => "Clear",
        TextKey::BtnExport => "Export",
        TextKey::BtnImport => "Import",

        TextKey::DropZoneText => "Glisser-déposer des images ici ou cliquer pour sélectionner",
        TextKey::SliderLabel => "Taille des images",

        TextKey::FullscreenCompare => "Comparer avec grille:",

        TextKey::DialogSelectFolder => "Sélectionner le dossier Checkpoints",
        TextKey::DialogExportTitle => "Exporter les résultats",
        TextKey::DialogImportTitle => "Importer une grille",

        TextKey::MsgNoImages => "Aucune image à exporter",
        TextKey::MsgExported => "Résultats exportés avec succès",
        TextKey::MsgImported => "Grille importée",
        TextKey::MsgCleared => "Grille vidée",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_languages_cover_a_key() {
        assert_eq!(Language::En.text(TextKey::WindowTitle), "Checkpoints Gallery");
        assert_eq!(Language::Fr.text(TextKey::WindowTitle), "Galerie de Checkpoints");
    }

    #[test]
    fn test_untranslated_button_labels_match() {
        // The original ships these untranslated in both tables.
        for key in [TextKey::BtnSelectFolder, TextKey::BtnClear, TextKey::BtnExport] {
            assert_eq!(Language::En.text(key), Language::Fr.text(key));
        }
    }
}
