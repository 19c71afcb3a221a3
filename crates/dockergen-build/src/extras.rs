//! Variant-specific configuration injected at `%%VARIANT_EXTRAS%%`.

use dockergen_core::Variant;

/// Apache configuration appended to the `apache` variant.
///
/// Authored with four-space indentation; [`normalize_extras`] converts it to
/// the tabs the templates use.
const APACHE_EXTRAS: &str = r#"
# Enable Short URLs
RUN set -eux; \
    a2enmod rewrite; \
    { \
        echo "<Directory /var/www/html>"; \
        echo "  RewriteEngine On"; \
        echo "  RewriteCond %{REQUEST_FILENAME} !-f"; \
        echo "  RewriteCond %{REQUEST_FILENAME} !-d"; \
        echo "  RewriteRule ^ %{DOCUMENT_ROOT}/index.php [L]"; \
        echo "</Directory>"; \
    } > "$APACHE_CONFDIR/conf-available/short-url.conf"; \
    a2enconf short-url

# Enable Upload security; see: https://www.mediawiki.org/wiki/Manual:Security#Upload_security
# Disable Image folder listings; https://www.mediawiki.org/wiki/Manual:Image_authorization#Apache_-_Deny_the_directory_list
RUN set -eux; \
    a2enmod headers; \
    { \
        echo "<Directory /var/www/html/images>"; \
        echo "  AllowOverride None"; \
        echo "  Options -Indexes"; \
        echo "  AddType text/plain .html .htm .shtml .phtml"; \
        echo "  php_admin_flag engine off"; \
        echo "</Directory>"; \
        echo "<Location /images>"; \
        echo "  Header set X-Content-Type-Options nosniff"; \
        echo "</Location>"; \
    } > "$APACHE_CONFDIR/conf-available/upload-security.conf"; \
    a2enconf upload-security

# Enable Image authorization; see: https://www.mediawiki.org/wiki/Manual:Image_authorization
RUN set -eux; \
    { \
        echo "Alias /var/www/data/images/ /img_auth.php/"; \
        echo "Alias /var/www/data/images /img_auth.php"; \
        echo ""; \
        echo "<Directory /var/www/html/images>"; \
        echo "  AllowOverride None"; \
        echo "  Deny from All"; \
        echo "</Directory>"; \
    } > "$APACHE_CONFDIR/conf-available/image-authorization.conf"; \
    a2enconf image-authorization

RUN set -eux; \
    { \
        echo "<Directory /var/www/html/mw-config>"; \
        echo "  AllowOverride None"; \
        echo "  Deny from All"; \
        echo "</Directory>"; \
    } > "$APACHE_CONFDIR/conf-available/disable-mw-config.conf";

# Enable AllowEncodedSlashes for VisualEditor
RUN sed -i "s/<\/VirtualHost>/\tAllowEncodedSlashes NoDecode\n<\/VirtualHost>/" "$APACHE_CONFDIR/sites-available/000-default.conf"

# Increase file upload limit
RUN sed -i "s/<\/VirtualHost>/\tphp_admin_value file_uploads 1\n\tphp_admin_value upload_max_filesize 50M\n\tphp_admin_value post_max_size 50M\n<\/VirtualHost>/" "$APACHE_CONFDIR/sites-available/000-default.conf"
"#;

const INDENT_UNIT: &str = "    ";

/// Extras for `variant`: the normalized apache block, or nothing.
pub fn variant_extras(variant: &Variant) -> String {
    if variant.is_apache() {
        normalize_extras(APACHE_EXTRAS)
    } else {
        String::new()
    }
}

/// Rewrite a shell continuation block to tab indentation.
///
/// Each run of four spaces in a line's leading indentation becomes a tab,
/// trailing whitespace is stripped from every line and from the block. A
/// leading newline is kept so the block starts on a line of its own.
///
/// ```
/// use dockergen_build::extras::normalize_extras;
///
/// let block = "\nRUN set -eux; \\\n    a2enmod rewrite  \n\n";
/// assert_eq!(normalize_extras(block), "\nRUN set -eux; \\\n\ta2enmod rewrite");
/// ```
pub fn normalize_extras(block: &str) -> String {
    let lines: Vec<String> = block.split('\n').map(normalize_line).collect();
    lines.join("\n").trim_end().to_owned()
}

fn normalize_line(line: &str) -> String {
    let line = line.trim_end();
    let body = line.trim_start_matches(' ');
    let spaces = line.len() - body.len();

    let mut out = String::with_capacity(line.len());
    for _ in 0..spaces / INDENT_UNIT.len() {
        out.push('\t');
    }
    for _ in 0..spaces % INDENT_UNIT.len() {
        out.push(' ');
    }
    out.push_str(body);
    out
}
