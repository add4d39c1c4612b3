// Dictionary Services and spell checker bindings for macOS.
// Every CoreFoundation object created or copied here is released before return.
use crate::core::provider::{DefinitionProvider, SuggestionProvider};
use crate::core::types::TermMatch;
use std::ffi::{c_char, c_void};
use std::ptr;
use tracing::debug;

type CFIndex = isize;
type CFStringRef = *const c_void;
type CFArrayRef = *const c_void;
type CFStringEncoding = u32;

type Id = *mut c_void;
type Sel = *const c_void;

const K_CF_STRING_ENCODING_UTF8: CFStringEncoding = 0x0800_0100;
const K_CF_NOT_FOUND: CFIndex = -1;

#[repr(C)]
#[derive(Clone, Copy)]
struct CFRange {
    location: CFIndex,
    length: CFIndex,
}

#[repr(C)]
#[derive(Clone, Copy)]
struct NSRange {
    location: usize,
    length: usize,
}

#[link(name = "CoreFoundation", kind = "framework")]
extern "C" {
    fn CFStringCreateWithBytes(
        alloc: *const c_void,
        bytes: *const u8,
        num_bytes: CFIndex,
        encoding: CFStringEncoding,
        is_external_representation: u8,
    ) -> CFStringRef;
    fn CFStringGetLength(string: CFStringRef) -> CFIndex;
    fn CFStringGetBytes(
        string: CFStringRef,
        range: CFRange,
        encoding: CFStringEncoding,
        loss_byte: u8,
        is_external_representation: u8,
        buffer: *mut u8,
        max_buf_len: CFIndex,
        used_buf_len: *mut CFIndex,
    ) -> CFIndex;
    fn CFArrayGetCount(array: CFArrayRef) -> CFIndex;
    fn CFArrayGetValueAtIndex(array: CFArrayRef, index: CFIndex) -> *const c_void;
    fn CFRelease(cf: *const c_void);
}

#[link(name = "CoreServices", kind = "framework")]
extern "C" {
    fn DCSGetTermRangeInString(dictionary: *const c_void, text: CFStringRef, offset: CFIndex) -> CFRange;
    fn DCSCopyTextDefinition(dictionary: *const c_void, text: CFStringRef, range: CFRange) -> CFStringRef;
}

#[link(name = "AppKit", kind = "framework")]
extern "C" {}

#[link(name = "objc")]
extern "C" {
    fn objc_getClass(name: *const c_char) -> Id;
    fn sel_registerName(name: *const c_char) -> Sel;
    fn objc_msgSend();
    fn objc_autoreleasePoolPush() -> *mut c_void;
    fn objc_autoreleasePoolPop(pool: *mut c_void);
}

/// Copies the UTF-16 `range` of a CFString out as UTF-8.
fn copy_utf8(string: CFStringRef, range: CFRange) -> Option<String> {
    let mut needed: CFIndex = 0;
    let converted = unsafe {
        CFStringGetBytes(string, range, K_CF_STRING_ENCODING_UTF8, 0, 0, ptr::null_mut(), 0, &mut needed)
    };
    if converted != range.length {
        return None;
    }
    let mut buffer = vec![0u8; usize::try_from(needed).ok()?];
    unsafe {
        CFStringGetBytes(
            string,
            range,
            K_CF_STRING_ENCODING_UTF8,
            0,
            0,
            buffer.as_mut_ptr(),
            needed,
            &mut needed,
        );
    }
    String::from_utf8(buffer).ok()
}

fn copy_all_utf8(string: CFStringRef) -> Option<String> {
    let length = unsafe { CFStringGetLength(string) };
    copy_utf8(string, CFRange { location: 0, length })
}

/// Owned CFString, released on drop.
struct CfString(CFStringRef);

impl CfString {
    fn new(s: &str) -> Option<Self> {
        let len = CFIndex::try_from(s.len()).ok()?;
        let raw = unsafe {
            CFStringCreateWithBytes(ptr::null(), s.as_ptr(), len, K_CF_STRING_ENCODING_UTF8, 0)
        };
        (!raw.is_null()).then_some(Self(raw))
    }

    fn len(&self) -> CFIndex {
        unsafe { CFStringGetLength(self.0) }
    }
}

impl Drop for CfString {
    fn drop(&mut self) {
        unsafe { CFRelease(self.0) }
    }
}

/// Autoreleased objects returned by AppKit live until this is dropped.
struct AutoreleasePool(*mut c_void);

impl AutoreleasePool {
    fn push() -> Self {
        Self(unsafe { objc_autoreleasePoolPush() })
    }
}

impl Drop for AutoreleasePool {
    fn drop(&mut self) {
        unsafe { objc_autoreleasePoolPop(self.0) }
    }
}

fn selector(name: &[u8]) -> Sel {
    unsafe { sel_registerName(name.as_ptr().cast()) }
}

/// The definition service of the operating system's Dictionary app.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemDictionary;

impl DefinitionProvider for SystemDictionary {
    fn define(&self, word: &str) -> Option<TermMatch> {
        let text = CfString::new(word)?;
        let range = unsafe { DCSGetTermRangeInString(ptr::null(), text.0, 0) };
        if range.location == K_CF_NOT_FOUND || range.length <= 0 {
            return None;
        }

        let raw = unsafe { DCSCopyTextDefinition(ptr::null(), text.0, range) };
        if raw.is_null() {
            return None;
        }
        let definition = CfString(raw);

        let headword = copy_utf8(text.0, range)?;
        let raw_text = copy_all_utf8(definition.0)?;
        Some(TermMatch { headword, raw_text })
    }
}

/// Guesses from the shared `NSSpellChecker` in its current language.
#[derive(Debug, Clone, Copy)]
pub struct SystemSpellChecker {
    max_suggestions: usize,
}

impl SystemSpellChecker {
    pub fn new(max_suggestions: usize) -> Self {
        Self { max_suggestions }
    }

    fn guesses(&self, word: &str) -> Option<Vec<String>> {
        let term = CfString::new(word)?;
        let length = usize::try_from(term.len()).ok()?;
        let _pool = AutoreleasePool::push();

        // NSString and NSArray are toll-free bridged with CFString and CFArray.
        let send0: unsafe extern "C" fn(Id, Sel) -> Id =
            unsafe { std::mem::transmute(objc_msgSend as unsafe extern "C" fn()) };
        let send_guesses: unsafe extern "C" fn(Id, Sel, NSRange, Id, Id, isize) -> Id =
            unsafe { std::mem::transmute(objc_msgSend as unsafe extern "C" fn()) };

        let class = unsafe { objc_getClass(b"NSSpellChecker\0".as_ptr().cast()) };
        if class.is_null() {
            return None;
        }
        let checker = unsafe { send0(class, selector(b"sharedSpellChecker\0")) };
        if checker.is_null() {
            return None;
        }
        let language = unsafe { send0(checker, selector(b"language\0")) };
        let guesses = unsafe {
            send_guesses(
                checker,
                selector(b"guessesForWordRange:inString:language:inSpellDocumentWithTag:\0"),
                NSRange { location: 0, length },
                term.0.cast_mut(),
                language,
                0,
            )
        };
        if guesses.is_null() {
            return None;
        }

        let count = unsafe { CFArrayGetCount(guesses.cast_const()) };
        let words = (0..count)
            .filter_map(|i| {
                let guess = unsafe { CFArrayGetValueAtIndex(guesses.cast_const(), i) };
                (!guess.is_null()).then(|| copy_all_utf8(guess)).flatten()
            })
            .take(self.max_suggestions)
            .collect();
        Some(words)
    }
}

impl SuggestionProvider for SystemSpellChecker {
    fn suggest(&self, word: &str) -> Vec<String> {
        let word = word.trim();
        if word.is_empty() || self.max_suggestions == 0 {
            return Vec::new();
        }
        let guesses = self.guesses(word).unwrap_or_default();
        debug!(word, guesses = guesses.len(), "system spell checker");
        guesses
    }
}
