// Copyright 2024 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt::Display;
use std::str::FromStr;

use crate::error::Error;

/// Content type of an input.
///
/// This is a closed enumeration over every label the bundled model's
/// `target_labels_space` can produce, plus the reserved labels that are only
/// ever produced by the dispatcher short-circuiting before inference
/// (`Undefined`, `Empty`, `Directory`, `Symlink`). `Txt` and `Unknown` double
/// as both a model target label and a low-confidence fallback label; see
/// [`crate::decision`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(into = "String", try_from = "String"))]
pub enum ContentTypeLabel {
    /// Model did not produce a prediction (short-circuited before inference).
    Undefined,
    /// The input had zero length.
    Empty,
    /// The input is a directory.
    Directory,
    /// The input is a symbolic link (only produced with `no_dereference`).
    Symlink,
    /// Adobe Illustrator Artwork
    Ai,
    /// Android package
    Apk,
    /// Apple property list
    Appleplist,
    /// Assembly
    Asm,
    /// ASP source
    Asp,
    /// DOS batch file
    Batch,
    /// BMP image data
    Bmp,
    /// bzip2 compressed data
    Bzip,
    /// C source
    C,
    /// Microsoft Cabinet archive data
    Cab,
    /// Windows Catalog file
    Cat,
    /// MS Windows HtmlHelp Data
    Chm,
    /// Intel 80386 COFF
    Coff,
    /// Google Chrome extension
    Crx,
    /// C# source
    Cs,
    /// CSS source
    Css,
    /// CSV document
    Csv,
    /// Debian binary package
    Deb,
    /// Dalvik dex file
    Dex,
    /// Apple disk image
    Dmg,
    /// Microsoft Word CDF document
    Doc,
    /// Microsoft Word 2007+ document
    Docx,
    /// ELF executable
    Elf,
    /// Windows Enhanced Metafile image data
    Emf,
    /// RFC 822 mail
    Eml,
    /// EPUB document
    Epub,
    /// FLAC audio bitstream data
    Flac,
    /// GIF image data
    Gif,
    /// Golang source
    Go,
    /// gzip compressed data
    Gzip,
    /// MS Windows help
    Hlp,
    /// HTML document
    Html,
    /// MS Windows icon resource
    Ico,
    /// INI configuration file
    Ini,
    /// MS Windows Internet shortcut
    Internetshortcut,
    /// ISO 9660 CD-ROM filesystem data
    Iso,
    /// Java archive data (JAR)
    Jar,
    /// Java source
    Java,
    /// Java compiled bytecode
    Javabytecode,
    /// JavaScript source
    Javascript,
    /// JPEG image data
    Jpeg,
    /// JSON document
    Json,
    /// LaTeX document
    Latex,
    /// Lisp source
    Lisp,
    /// MS Windows shortcut
    Lnk,
    /// M3U playlist
    M3u,
    /// Mach-O executable
    Macho,
    /// Makefile source
    Makefile,
    /// Markdown document
    Markdown,
    /// MHTML document
    Mht,
    /// MP3 media file
    Mp3,
    /// MP4 media file
    Mp4,
    /// MS Compress archive data
    Mscompress,
    /// Microsoft Installer file
    Msi,
    /// Windows Update Package file
    Mum,
    /// ODEX ELF executable
    Odex,
    /// OpenDocument Presentation
    Odp,
    /// OpenDocument Spreadsheet
    Ods,
    /// OpenDocument Text
    Odt,
    /// Ogg data
    Ogg,
    /// MS Outlook Message
    Outlook,
    /// pcap capture file
    Pcap,
    /// PDF document
    Pdf,
    /// PE executable
    Pebin,
    /// PEM certificate
    Pem,
    /// Perl source
    Perl,
    /// PHP source
    Php,
    /// PNG image data
    Png,
    /// PostScript document
    Postscript,
    /// Powershell source
    Powershell,
    /// Microsoft PowerPoint CDF document
    Ppt,
    /// Microsoft PowerPoint 2007+ document
    Pptx,
    /// Python source
    Python,
    /// Python compiled bytecode
    Pythonbytecode,
    /// RAR archive data
    Rar,
    /// Resource Description Framework document (RDF)
    Rdf,
    /// RedHat Package Manager archive (RPM)
    Rpm,
    /// ReStructuredText document
    Rst,
    /// Rich Text Format document
    Rtf,
    /// Ruby source
    Ruby,
    /// Rust source
    Rust,
    /// Scala source
    Scala,
    /// 7-zip archive data
    Sevenzip,
    /// Shell script
    Shell,
    /// Smali source
    Smali,
    /// SQL source
    Sql,
    /// Squash filesystem
    Squashfs,
    /// SVG Scalable Vector Graphics image data
    Svg,
    /// Macromedia Flash data
    Swf,
    /// Symbolic link (textual representation)
    Symlinktext,
    /// POSIX tar archive
    Tar,
    /// Targa image data
    Tga,
    /// TIFF image data
    Tiff,
    /// BitTorrent file
    Torrent,
    /// TrueType Font data
    Ttf,
    /// Generic text document
    Txt,
    /// Unknown binary data
    Unknown,
    /// MS Visual Basic source (VBA)
    Vba,
    /// Waveform Audio file (WAV)
    Wav,
    /// WebM data
    Webm,
    /// WebP data
    Webp,
    /// Windows Registry text
    Winregistry,
    /// Windows metafile
    Wmf,
    /// XAR archive compressed data
    Xar,
    /// Microsoft Excel CDF document
    Xls,
    /// Microsoft Excel 2007+ document (binary format)
    Xlsb,
    /// Microsoft Excel 2007+ document
    Xlsx,
    /// XML document
    Xml,
    /// Compressed installation archive (XPI)
    Xpi,
    /// XZ compressed data
    Xz,
    /// YAML source
    Yaml,
    /// Zip archive data
    Zip,
    /// zlib compressed data
    Zlibstream,
}

impl ContentTypeLabel {
    /// Returns the wire representation used by the model config and the
    /// content-type knowledge base (e.g. `"python"`, `"pdf"`, `"txt"`).
    pub fn as_str(self) -> &'static str {
        match self {
            ContentTypeLabel::Undefined => "undefined",
            ContentTypeLabel::Empty => "empty",
            ContentTypeLabel::Directory => "directory",
            ContentTypeLabel::Symlink => "symlink",
            ContentTypeLabel::Ai => "ai",
            ContentTypeLabel::Apk => "apk",
            ContentTypeLabel::Appleplist => "appleplist",
            ContentTypeLabel::Asm => "asm",
            ContentTypeLabel::Asp => "asp",
            ContentTypeLabel::Batch => "batch",
            ContentTypeLabel::Bmp => "bmp",
            ContentTypeLabel::Bzip => "bzip",
            ContentTypeLabel::C => "c",
            ContentTypeLabel::Cab => "cab",
            ContentTypeLabel::Cat => "cat",
            ContentTypeLabel::Chm => "chm",
            ContentTypeLabel::Coff => "coff",
            ContentTypeLabel::Crx => "crx",
            ContentTypeLabel::Cs => "cs",
            ContentTypeLabel::Css => "css",
            ContentTypeLabel::Csv => "csv",
            ContentTypeLabel::Deb => "deb",
            ContentTypeLabel::Dex => "dex",
            ContentTypeLabel::Dmg => "dmg",
            ContentTypeLabel::Doc => "doc",
            ContentTypeLabel::Docx => "docx",
            ContentTypeLabel::Elf => "elf",
            ContentTypeLabel::Emf => "emf",
            ContentTypeLabel::Eml => "eml",
            ContentTypeLabel::Epub => "epub",
            ContentTypeLabel::Flac => "flac",
            ContentTypeLabel::Gif => "gif",
            ContentTypeLabel::Go => "go",
            ContentTypeLabel::Gzip => "gzip",
            ContentTypeLabel::Hlp => "hlp",
            ContentTypeLabel::Html => "html",
            ContentTypeLabel::Ico => "ico",
            ContentTypeLabel::Ini => "ini",
            ContentTypeLabel::Internetshortcut => "internetshortcut",
            ContentTypeLabel::Iso => "iso",
            ContentTypeLabel::Jar => "jar",
            ContentTypeLabel::Java => "java",
            ContentTypeLabel::Javabytecode => "javabytecode",
            ContentTypeLabel::Javascript => "javascript",
            ContentTypeLabel::Jpeg => "jpeg",
            ContentTypeLabel::Json => "json",
            ContentTypeLabel::Latex => "latex",
            ContentTypeLabel::Lisp => "lisp",
            ContentTypeLabel::Lnk => "lnk",
            ContentTypeLabel::M3u => "m3u",
            ContentTypeLabel::Macho => "macho",
            ContentTypeLabel::Makefile => "makefile",
            ContentTypeLabel::Markdown => "markdown",
            ContentTypeLabel::Mht => "mht",
            ContentTypeLabel::Mp3 => "mp3",
            ContentTypeLabel::Mp4 => "mp4",
            ContentTypeLabel::Mscompress => "mscompress",
            ContentTypeLabel::Msi => "msi",
            ContentTypeLabel::Mum => "mum",
            ContentTypeLabel::Odex => "odex",
            ContentTypeLabel::Odp => "odp",
            ContentTypeLabel::Ods => "ods",
            ContentTypeLabel::Odt => "odt",
            ContentTypeLabel::Ogg => "ogg",
            ContentTypeLabel::Outlook => "outlook",
            ContentTypeLabel::Pcap => "pcap",
            ContentTypeLabel::Pdf => "pdf",
            ContentTypeLabel::Pebin => "pebin",
            ContentTypeLabel::Pem => "pem",
            ContentTypeLabel::Perl => "perl",
            ContentTypeLabel::Php => "php",
            ContentTypeLabel::Png => "png",
            ContentTypeLabel::Postscript => "postscript",
            ContentTypeLabel::Powershell => "powershell",
            ContentTypeLabel::Ppt => "ppt",
            ContentTypeLabel::Pptx => "pptx",
            ContentTypeLabel::Python => "python",
            ContentTypeLabel::Pythonbytecode => "pythonbytecode",
            ContentTypeLabel::Rar => "rar",
            ContentTypeLabel::Rdf => "rdf",
            ContentTypeLabel::Rpm => "rpm",
            ContentTypeLabel::Rst => "rst",
            ContentTypeLabel::Rtf => "rtf",
            ContentTypeLabel::Ruby => "ruby",
            ContentTypeLabel::Rust => "rust",
            ContentTypeLabel::Scala => "scala",
            ContentTypeLabel::Sevenzip => "sevenzip",
            ContentTypeLabel::Shell => "shell",
            ContentTypeLabel::Smali => "smali",
            ContentTypeLabel::Sql => "sql",
            ContentTypeLabel::Squashfs => "squashfs",
            ContentTypeLabel::Svg => "svg",
            ContentTypeLabel::Swf => "swf",
            ContentTypeLabel::Symlinktext => "symlinktext",
            ContentTypeLabel::Tar => "tar",
            ContentTypeLabel::Tga => "tga",
            ContentTypeLabel::Tiff => "tiff",
            ContentTypeLabel::Torrent => "torrent",
            ContentTypeLabel::Ttf => "ttf",
            ContentTypeLabel::Txt => "txt",
            ContentTypeLabel::Unknown => "unknown",
            ContentTypeLabel::Vba => "vba",
            ContentTypeLabel::Wav => "wav",
            ContentTypeLabel::Webm => "webm",
            ContentTypeLabel::Webp => "webp",
            ContentTypeLabel::Winregistry => "winregistry",
            ContentTypeLabel::Wmf => "wmf",
            ContentTypeLabel::Xar => "xar",
            ContentTypeLabel::Xls => "xls",
            ContentTypeLabel::Xlsb => "xlsb",
            ContentTypeLabel::Xlsx => "xlsx",
            ContentTypeLabel::Xml => "xml",
            ContentTypeLabel::Xpi => "xpi",
            ContentTypeLabel::Xz => "xz",
            ContentTypeLabel::Yaml => "yaml",
            ContentTypeLabel::Zip => "zip",
            ContentTypeLabel::Zlibstream => "zlibstream",
        }
    }

    /// All labels, in declaration order. Used to build [`crate::catalog::ContentTypeCatalog`]
    /// lookups and by tests that want to exercise every label.
    pub(crate) fn all() -> &'static [ContentTypeLabel] {
        &[
    ContentTypeLabel::Undefined,
    ContentTypeLabel::Empty,
    ContentTypeLabel::Directory,
    ContentTypeLabel::Symlink,
    ContentTypeLabel::Ai,
    ContentTypeLabel::Apk,
    ContentTypeLabel::Appleplist,
    ContentTypeLabel::Asm,
    ContentTypeLabel::Asp,
    ContentTypeLabel::Batch,
    ContentTypeLabel::Bmp,
    ContentTypeLabel::Bzip,
    ContentTypeLabel::C,
    ContentTypeLabel::Cab,
    ContentTypeLabel::Cat,
    ContentTypeLabel::Chm,
    ContentTypeLabel::Coff,
    ContentTypeLabel::Crx,
    ContentTypeLabel::Cs,
    ContentTypeLabel::Css,
    ContentTypeLabel::Csv,
    ContentTypeLabel::Deb,
    ContentTypeLabel::Dex,
    ContentTypeLabel::Dmg,
    ContentTypeLabel::Doc,
    ContentTypeLabel::Docx,
    ContentTypeLabel::Elf,
    ContentTypeLabel::Emf,
    ContentTypeLabel::Eml,
    ContentTypeLabel::Epub,
    ContentTypeLabel::Flac,
    ContentTypeLabel::Gif,
    ContentTypeLabel::Go,
    ContentTypeLabel::Gzip,
    ContentTypeLabel::Hlp,
    ContentTypeLabel::Html,
    ContentTypeLabel::Ico,
    ContentTypeLabel::Ini,
    ContentTypeLabel::Internetshortcut,
    ContentTypeLabel::Iso,
    ContentTypeLabel::Jar,
    ContentTypeLabel::Java,
    ContentTypeLabel::Javabytecode,
    ContentTypeLabel::Javascript,
    ContentTypeLabel::Jpeg,
    ContentTypeLabel::Json,
    ContentTypeLabel::Latex,
    ContentTypeLabel::Lisp,
    ContentTypeLabel::Lnk,
    ContentTypeLabel::M3u,
    ContentTypeLabel::Macho,
    ContentTypeLabel::Makefile,
    ContentTypeLabel::Markdown,
    ContentTypeLabel::Mht,
    ContentTypeLabel::Mp3,
    ContentTypeLabel::Mp4,
    ContentTypeLabel::Mscompress,
    ContentTypeLabel::Msi,
    ContentTypeLabel::Mum,
    ContentTypeLabel::Odex,
    ContentTypeLabel::Odp,
    ContentTypeLabel::Ods,
    ContentTypeLabel::Odt,
    ContentTypeLabel::Ogg,
    ContentTypeLabel::Outlook,
    ContentTypeLabel::Pcap,
    ContentTypeLabel::Pdf,
    ContentTypeLabel::Pebin,
    ContentTypeLabel::Pem,
    ContentTypeLabel::Perl,
    ContentTypeLabel::Php,
    ContentTypeLabel::Png,
    ContentTypeLabel::Postscript,
    ContentTypeLabel::Powershell,
    ContentTypeLabel::Ppt,
    ContentTypeLabel::Pptx,
    ContentTypeLabel::Python,
    ContentTypeLabel::Pythonbytecode,
    ContentTypeLabel::Rar,
    ContentTypeLabel::Rdf,
    ContentTypeLabel::Rpm,
    ContentTypeLabel::Rst,
    ContentTypeLabel::Rtf,
    ContentTypeLabel::Ruby,
    ContentTypeLabel::Rust,
    ContentTypeLabel::Scala,
    ContentTypeLabel::Sevenzip,
    ContentTypeLabel::Shell,
    ContentTypeLabel::Smali,
    ContentTypeLabel::Sql,
    ContentTypeLabel::Squashfs,
    ContentTypeLabel::Svg,
    ContentTypeLabel::Swf,
    ContentTypeLabel::Symlinktext,
    ContentTypeLabel::Tar,
    ContentTypeLabel::Tga,
    ContentTypeLabel::Tiff,
    ContentTypeLabel::Torrent,
    ContentTypeLabel::Ttf,
    ContentTypeLabel::Txt,
    ContentTypeLabel::Unknown,
    ContentTypeLabel::Vba,
    ContentTypeLabel::Wav,
    ContentTypeLabel::Webm,
    ContentTypeLabel::Webp,
    ContentTypeLabel::Winregistry,
    ContentTypeLabel::Wmf,
    ContentTypeLabel::Xar,
    ContentTypeLabel::Xls,
    ContentTypeLabel::Xlsb,
    ContentTypeLabel::Xlsx,
    ContentTypeLabel::Xml,
    ContentTypeLabel::Xpi,
    ContentTypeLabel::Xz,
    ContentTypeLabel::Yaml,
    ContentTypeLabel::Zip,
    ContentTypeLabel::Zlibstream,
        ]
    }
}

impl Display for ContentTypeLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentTypeLabel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "undefined" => ContentTypeLabel::Undefined,
            "empty" => ContentTypeLabel::Empty,
            "directory" => ContentTypeLabel::Directory,
            "symlink" => ContentTypeLabel::Symlink,
            "ai" => ContentTypeLabel::Ai,
            "apk" => ContentTypeLabel::Apk,
            "appleplist" => ContentTypeLabel::Appleplist,
            "asm" => ContentTypeLabel::Asm,
            "asp" => ContentTypeLabel::Asp,
            "batch" => ContentTypeLabel::Batch,
            "bmp" => ContentTypeLabel::Bmp,
            "bzip" => ContentTypeLabel::Bzip,
            "c" => ContentTypeLabel::C,
            "cab" => ContentTypeLabel::Cab,
            "cat" => ContentTypeLabel::Cat,
            "chm" => ContentTypeLabel::Chm,
            "coff" => ContentTypeLabel::Coff,
            "crx" => ContentTypeLabel::Crx,
            "cs" => ContentTypeLabel::Cs,
            "css" => ContentTypeLabel::Css,
            "csv" => ContentTypeLabel::Csv,
            "deb" => ContentTypeLabel::Deb,
            "dex" => ContentTypeLabel::Dex,
            "dmg" => ContentTypeLabel::Dmg,
            "doc" => ContentTypeLabel::Doc,
            "docx" => ContentTypeLabel::Docx,
            "elf" => ContentTypeLabel::Elf,
            "emf" => ContentTypeLabel::Emf,
            "eml" => ContentTypeLabel::Eml,
            "epub" => ContentTypeLabel::Epub,
            "flac" => ContentTypeLabel::Flac,
            "gif" => ContentTypeLabel::Gif,
            "go" => ContentTypeLabel::Go,
            "gzip" => ContentTypeLabel::Gzip,
            "hlp" => ContentTypeLabel::Hlp,
            "html" => ContentTypeLabel::Html,
            "ico" => ContentTypeLabel::Ico,
            "ini" => ContentTypeLabel::Ini,
            "internetshortcut" => ContentTypeLabel::Internetshortcut,
            "iso" => ContentTypeLabel::Iso,
            "jar" => ContentTypeLabel::Jar,
            "java" => ContentTypeLabel::Java,
            "javabytecode" => ContentTypeLabel::Javabytecode,
            "javascript" => ContentTypeLabel::Javascript,
            "jpeg" => ContentTypeLabel::Jpeg,
            "json" => ContentTypeLabel::Json,
            "latex" => ContentTypeLabel::Latex,
            "lisp" => ContentTypeLabel::Lisp,
            "lnk" => ContentTypeLabel::Lnk,
            "m3u" => ContentTypeLabel::M3u,
            "macho" => ContentTypeLabel::Macho,
            "makefile" => ContentTypeLabel::Makefile,
            "markdown" => ContentTypeLabel::Markdown,
            "mht" => ContentTypeLabel::Mht,
            "mp3" => ContentTypeLabel::Mp3,
            "mp4" => ContentTypeLabel::Mp4,
            "mscompress" => ContentTypeLabel::Mscompress,
            "msi" => ContentTypeLabel::Msi,
            "mum" => ContentTypeLabel::Mum,
            "odex" => ContentTypeLabel::Odex,
            "odp" => ContentTypeLabel::Odp,
            "ods" => ContentTypeLabel::Ods,
            "odt" => ContentTypeLabel::Odt,
            "ogg" => ContentTypeLabel::Ogg,
            "outlook" => ContentTypeLabel::Outlook,
            "pcap" => ContentTypeLabel::Pcap,
            "pdf" => ContentTypeLabel::Pdf,
            "pebin" => ContentTypeLabel::Pebin,
            "pem" => ContentTypeLabel::Pem,
            "perl" => ContentTypeLabel::Perl,
            "php" => ContentTypeLabel::Php,
            "png" => ContentTypeLabel::Png,
            "postscript" => ContentTypeLabel::Postscript,
            "powershell" => ContentTypeLabel::Powershell,
            "ppt" => ContentTypeLabel::Ppt,
            "pptx" => ContentTypeLabel::Pptx,
            "python" => ContentTypeLabel::Python,
            "pythonbytecode" => ContentTypeLabel::Pythonbytecode,
            "rar" => ContentTypeLabel::Rar,
            "rdf" => ContentTypeLabel::Rdf,
            "rpm" => ContentTypeLabel::Rpm,
            "rst" => ContentTypeLabel::Rst,
            "rtf" => ContentTypeLabel::Rtf,
            "ruby" => ContentTypeLabel::Ruby,
            "rust" => ContentTypeLabel::Rust,
            "scala" => ContentTypeLabel::Scala,
            "sevenzip" => ContentTypeLabel::Sevenzip,
            "shell" => ContentTypeLabel::Shell,
            "smali" => ContentTypeLabel::Smali,
            "sql" => ContentTypeLabel::Sql,
            "squashfs" => ContentTypeLabel::Squashfs,
            "svg" => ContentTypeLabel::Svg,
            "swf" => ContentTypeLabel::Swf,
            "symlinktext" => ContentTypeLabel::Symlinktext,
            "tar" => ContentTypeLabel::Tar,
            "tga" => ContentTypeLabel::Tga,
            "tiff" => ContentTypeLabel::Tiff,
            "torrent" => ContentTypeLabel::Torrent,
            "ttf" => ContentTypeLabel::Ttf,
            "txt" => ContentTypeLabel::Txt,
            "unknown" => ContentTypeLabel::Unknown,
            "vba" => ContentTypeLabel::Vba,
            "wav" => ContentTypeLabel::Wav,
            "webm" => ContentTypeLabel::Webm,
            "webp" => ContentTypeLabel::Webp,
            "winregistry" => ContentTypeLabel::Winregistry,
            "wmf" => ContentTypeLabel::Wmf,
            "xar" => ContentTypeLabel::Xar,
            "xls" => ContentTypeLabel::Xls,
            "xlsb" => ContentTypeLabel::Xlsb,
            "xlsx" => ContentTypeLabel::Xlsx,
            "xml" => ContentTypeLabel::Xml,
            "xpi" => ContentTypeLabel::Xpi,
            "xz" => ContentTypeLabel::Xz,
            "yaml" => ContentTypeLabel::Yaml,
            "zip" => ContentTypeLabel::Zip,
            "zlibstream" => ContentTypeLabel::Zlibstream,
            _ => return Err(Error::UnknownLabel(s.to_string())),
        })
    }
}

#[cfg(feature = "serde")]
impl TryFrom<String> for ContentTypeLabel {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[cfg(feature = "serde")]
impl From<ContentTypeLabel> for String {
    fn from(label: ContentTypeLabel) -> Self {
        label.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_str() {
        for &label in ContentTypeLabel::all() {
            assert_eq!(label.as_str().parse::<ContentTypeLabel>().unwrap(), label);
        }
    }

    #[test]
    fn unknown_string_is_rejected() {
        assert!("not-a-real-label".parse::<ContentTypeLabel>().is_err());
    }

    #[test]
    fn txt_and_unknown_are_regular_labels() {
        assert_eq!("txt".parse::<ContentTypeLabel>().unwrap(), ContentTypeLabel::Txt);
        assert_eq!("unknown".parse::<ContentTypeLabel>().unwrap(), ContentTypeLabel::Unknown);
    }
}
